//! # Configuration File Loading
//!
//! Generic YAML loading with default seeding.
//!
//! Loading never caches; that is the job of [`crate::ConfigManager`].

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::resolver::resolve_path;

/// Load a configuration document of type `T`.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Resolves `path` (see [`resolve_path`]), reads it and layers its contents
/// over `create_default()`, so every field the document leaves out keeps its
/// default value.
///
/// ## Usage
/// ```rust,no_run
/// use apis::kind;
///
/// fn main() -> Result<(), config::ConfigError> {
///     let cluster: kind::Cluster = config::load("kind.yaml", kind::Cluster::default)?;
///     println!("nodes: {}", cluster.nodes.len());
///     Ok(())
/// }
/// ```
///
/// ## Error Handling
/// - Missing file: not an error, returns `create_default()`
/// - Working directory unavailable: [`ConfigError::PathResolution`]
/// - File exists but cannot be read: [`ConfigError::FileRead`]
/// - Invalid YAML or wrong field types: [`ConfigError::Deserialization`]
pub fn load<T, F>(path: impl AsRef<Path>, create_default: F) -> ConfigResult<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
{
    let requested = path.as_ref();
    let resolved = resolve_path(requested).map_err(|source| ConfigError::PathResolution {
        path: requested.to_path_buf(),
        source
    })?;

    match fs::metadata(&resolved) {
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %resolved.display(), "config file not found, using defaults");
            return Ok(create_default());
        }
        Err(source) => {
            return Err(ConfigError::FileRead {
                path: resolved,
                source
            });
        }
    }

    let contents = fs::read_to_string(&resolved).map_err(|source| ConfigError::FileRead {
        path: resolved.clone(),
        source
    })?;

    let config = from_yaml_over(create_default(), &contents, &resolved)?;
    debug!(path = %resolved.display(), "loaded config file");
    Ok(config)
}

/// Deserialize `contents` over `seed`.
///
/// An empty document (or one that is just `null`) yields `seed` unchanged.
pub fn from_yaml_over<T>(seed: T, contents: &str, path: &Path) -> ConfigResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let document: Value =
        serde_yaml::from_str(contents).map_err(|source| ConfigError::Deserialization {
            path: path.to_path_buf(),
            source
        })?;
    if document.is_null() {
        return Ok(seed);
    }

    let mut merged = serde_yaml::to_value(&seed).map_err(|err| ConfigError::Seed {
        kind: std::any::type_name::<T>(),
        reason: err.to_string()
    })?;
    merge_values(&mut merged, document);

    serde_yaml::from_value(merged).map_err(|source| ConfigError::Deserialization {
        path: path.to_path_buf(),
        source
    })
}

/// Layer `overlay` onto `base`.
///
/// Mappings merge key by key; any other value replaces the base value
/// outright. An explicit `null` keeps the base value.
pub fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apis::k3d::SimpleConfig;
    use apis::kind::{self, NodeRole};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn seeded_kind() -> kind::Cluster {
        let mut cluster = kind::Cluster::default();
        cluster.type_meta = apis::KIND_DEFAULTS.type_meta();
        cluster.networking.pod_subnet = "10.1.0.0/16".to_string();
        cluster
    }

    #[test]
    fn test_missing_file_returns_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kind.yaml");

        let cluster: kind::Cluster = load(&path, seeded_kind).unwrap();
        assert_eq!(cluster, seeded_kind());
    }

    #[test]
    fn test_document_values_override_seed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kind.yaml");
        fs::write(
            &path,
            "name: dev\nnodes:\n  - role: worker\nnetworking:\n  serviceSubnet: 10.2.0.0/16\n",
        )
        .unwrap();

        let cluster: kind::Cluster = load(&path, seeded_kind).unwrap();
        assert_eq!(cluster.name, "dev");
        assert_eq!(cluster.nodes.len(), 1);
        assert_eq!(cluster.nodes[0].role, NodeRole::Worker);
        assert_eq!(cluster.networking.service_subnet, "10.2.0.0/16");
        // Absent from the document, so the seed survives.
        assert_eq!(cluster.networking.pod_subnet, "10.1.0.0/16");
        assert_eq!(cluster.type_meta, apis::KIND_DEFAULTS.type_meta());
    }

    #[test]
    fn test_empty_document_returns_seed() {
        let seed = seeded_kind();
        let cluster = from_yaml_over(seed.clone(), "# nothing here\n", Path::new("kind.yaml"))
            .unwrap();
        assert_eq!(cluster, seed);
    }

    #[test]
    fn test_explicit_null_keeps_seed_value() {
        let mut seed = SimpleConfig::default();
        seed.image = "rancher/k3s:v1.31.0-k3s1".to_string();

        let config = from_yaml_over(seed, "image: ~\nagents: 3\n", Path::new("k3d.yaml")).unwrap();
        assert_eq!(config.image, "rancher/k3s:v1.31.0-k3s1");
        assert_eq!(config.agents, 3);
    }

    #[test]
    fn test_invalid_yaml_is_deserialization_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kind.yaml");
        fs::write(&path, "nodes: [unterminated\n").unwrap();

        let err = load(&path, seeded_kind).unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization { .. }));
        assert!(err.to_string().contains("kind.yaml"));
    }

    #[test]
    fn test_wrong_field_type_is_deserialization_error() {
        let err = from_yaml_over(SimpleConfig::default(), "servers: lots\n", Path::new("k3d.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization { .. }));
    }

    #[test]
    fn test_directory_is_read_error() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("kind.yaml");
        fs::create_dir(&dir).unwrap();

        let err = load(&dir, seeded_kind).unwrap_err();
        match err {
            ConfigError::FileRead { path, .. } => assert_eq!(path, PathBuf::from(&dir)),
            other => panic!("expected FileRead, got {other:?}")
        }
    }

    #[test]
    fn test_merge_values_replaces_sequences() {
        let mut base: Value = serde_yaml::from_str("a: [1, 2]\nb: {c: 1, d: 2}\n").unwrap();
        let overlay: Value = serde_yaml::from_str("a: [3]\nb: {d: 4}\n").unwrap();
        merge_values(&mut base, overlay);

        let expected: Value = serde_yaml::from_str("a: [3]\nb: {c: 1, d: 4}\n").unwrap();
        assert_eq!(base, expected);
    }
}
