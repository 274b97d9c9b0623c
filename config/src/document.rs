//! Loading the distribution document a top-level `Cluster` points at.

use std::sync::Arc;

use apis::{Distribution, DistributionDocument, eks, k3d, kind, ksail};
use tracing::debug;

use crate::error::ConfigResult;
use crate::manager::ConfigManager;

/// A distribution document after defaults and validation, with its concrete
/// type still known.
#[derive(Debug, Clone)]
pub enum LoadedDocument {
    Kind(Arc<kind::Cluster>),
    K3d(Arc<k3d::SimpleConfig>),
    Eks(Arc<eks::ClusterConfig>)
}

impl LoadedDocument {
    pub fn as_document(&self) -> &dyn DistributionDocument {
        match self {
            Self::Kind(config) => &**config,
            Self::K3d(config) => &**config,
            Self::Eks(config) => &**config
        }
    }

    pub fn into_document(self) -> Arc<dyn DistributionDocument> {
        match self {
            Self::Kind(config) => config,
            Self::K3d(config) => config,
            Self::Eks(config) => config
        }
    }
}

/// Load `spec.distributionConfig` with the manager matching
/// `spec.distribution`.
///
/// Returns `Ok(None)` when the distribution is blank, unknown or not yet
/// supported; those cases are reported by [`validation::ClusterValidator`].
/// A blank `distributionConfig` falls back to the family's default file, and
/// a missing file yields the family defaults like any other load.
pub fn load_distribution(cluster: &ksail::Cluster) -> ConfigResult<Option<LoadedDocument>> {
    let spec = &cluster.spec;
    let Some(distribution) = spec.parsed_distribution() else {
        debug!(distribution = %spec.distribution, "no loadable distribution document");
        return Ok(None);
    };
    let Some(defaults) = distribution.defaults() else {
        debug!(%distribution, "distribution has no document loader yet");
        return Ok(None);
    };

    let path = if spec.distribution_config.is_empty() {
        defaults.config_file
    } else {
        spec.distribution_config.as_str()
    };

    let document = match distribution {
        Distribution::Kind => LoadedDocument::Kind(ConfigManager::kind(path).load_config()?),
        Distribution::K3d => LoadedDocument::K3d(ConfigManager::k3d(path).load_config()?),
        Distribution::Eks => LoadedDocument::Eks(ConfigManager::eks(path).load_config()?),
        Distribution::Tind => return Ok(None)
    };
    Ok(Some(document))
}

/// [`load_distribution`], viewed through [`DistributionDocument`].
pub fn load_distribution_document(
    cluster: &ksail::Cluster,
) -> ConfigResult<Option<Arc<dyn DistributionDocument>>> {
    Ok(load_distribution(cluster)?.map(LoadedDocument::into_document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn spec(distribution: &str, config: &str) -> ksail::Cluster {
        let mut cluster = ksail::Cluster::with_defaults();
        cluster.spec.distribution = distribution.to_string();
        cluster.spec.distribution_config = config.to_string();
        cluster
    }

    #[test]
    fn test_loads_matching_family() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("k3d.yaml");
        fs::write(&path, "metadata:\n  name: dev\n").unwrap();

        let document = load_distribution_document(&spec("k3d", path.to_str().unwrap()))
            .unwrap()
            .unwrap();
        assert_eq!(document.distribution(), Distribution::K3d);
        assert_eq!(document.cluster_name(), Some("dev"));
    }

    #[test]
    fn test_unsupported_and_unknown_yield_none() {
        assert!(load_distribution_document(&spec("Tind", "tind.yaml")).unwrap().is_none());
        assert!(load_distribution_document(&spec("Minikube", "x.yaml")).unwrap().is_none());
        assert!(load_distribution_document(&spec("", "kind.yaml")).unwrap().is_none());
    }

    #[test]
    fn test_concrete_document_keeps_its_type() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kind.yaml");
        fs::write(&path, "name: dev\n").unwrap();

        let document = load_distribution(&spec("Kind", path.to_str().unwrap()))
            .unwrap()
            .unwrap();
        let LoadedDocument::Kind(config) = &document else {
            panic!("expected a Kind document, got {document:?}");
        };
        assert_eq!(config.control_plane_count(), 1);
        assert_eq!(document.as_document().cluster_name(), Some("dev"));
    }

    #[test]
    fn test_invalid_document_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("eks.yaml");
        fs::write(&path, "metadata:\n  name: prod\n  region: \"\"\n").unwrap();

        let err = load_distribution_document(&spec("EKS", path.to_str().unwrap())).unwrap_err();
        let result = err.validation_result().unwrap();
        assert_eq!(result.errors()[0].field(), "metadata.region");
    }
}
