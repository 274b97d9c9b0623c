use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use tempfile::TempDir;

static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

pub fn unique_id(prefix: &str) -> String {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}", prefix, id)
}

/// A throwaway project directory, removed on drop.
pub struct TempProject {
    dir: TempDir
}

impl TempProject {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::Builder::new()
                .prefix(&unique_id("ksail-project"))
                .tempdir()?
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: impl AsRef<Path>, contents: &str) -> io::Result<PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        tracing::debug!(path = %path.display(), "wrote fixture file");
        Ok(path)
    }

    pub fn mkdir(&self, relative: impl AsRef<Path>) -> io::Result<PathBuf> {
        let path = self.path(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Files named `names` in directories above the project root.
    ///
    /// Relative config lookups walk up to `/`, so any hit here would be
    /// picked up in place of the defaults a test expects.
    pub fn ancestor_files(&self, names: &[&str]) -> Vec<PathBuf> {
        self.root()
            .ancestors()
            .skip(1)
            .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
            .filter(|path| path.exists())
            .collect()
    }
}

/// Changes the working directory until dropped.
pub struct CwdGuard {
    previous: PathBuf
}

impl CwdGuard {
    pub fn enter(dir: impl AsRef<Path>) -> io::Result<Self> {
        let previous = std::env::current_dir()?;
        std::env::set_current_dir(dir)?;
        Ok(Self { previous })
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            tracing::warn!("Failed to restore working directory: {:?}", e);
        }
    }
}

pub const KSAIL_KIND_YAML: &str = "\
apiVersion: ksail.io/v1alpha1
kind: Cluster
metadata:
  name: ksail
spec:
  distribution: Kind
  distributionConfig: kind.yaml
  connection:
    context: kind-ksail
";

pub const KIND_YAML: &str = "\
apiVersion: kind.x-k8s.io/v1alpha4
kind: Cluster
name: ksail
nodes:
  - role: control-plane
  - role: worker
";

pub const KIND_WORKERS_ONLY_YAML: &str = "\
name: broken
nodes:
  - role: worker
";

pub const K3D_YAML: &str = "\
apiVersion: k3d.io/v1alpha5
kind: Simple
metadata:
  name: other
servers: 1
agents: 2
";

pub const EKS_YAML: &str = "\
apiVersion: eksctl.io/v1alpha5
kind: ClusterConfig
metadata:
  name: prod
  region: eu-west-1
nodeGroups:
  - name: default
    desiredCapacity: 3
";

pub const EKS_BLANK_REGION_YAML: &str = "\
metadata:
  name: prod
  region: \"\"
";

/// Returns `ksail.yaml` contents for `distribution` with the given context.
pub fn ksail_yaml(distribution: &str, distribution_config: &str, context: &str) -> String {
    format!(
        "apiVersion: ksail.io/v1alpha1\nkind: Cluster\nspec:\n  distribution: {distribution}\n  distributionConfig: {distribution_config}\n  connection:\n    context: \"{context}\"\n"
    )
}
