//! # Config Manager
//!
//! Loads one distribution's document once and hands out the cached value.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use validation::ValidationResult;

use crate::error::{ConfigError, ConfigResult};
use crate::file_loader;

/// Per-distribution behaviour plugged into [`ConfigManager`].
pub trait DistributionPolicy: Send + Sync {
    type Config: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static;

    /// Family name used in logs and errors, e.g. `"Kind"`.
    fn name(&self) -> &'static str;

    /// Value used when the file is missing, and as the seed for fields a
    /// file leaves out. Must carry the family's type header.
    fn create_default(&self) -> Self::Config;

    /// Post-load fix-ups applied to every loaded value.
    fn normalize(&self, _config: &mut Self::Config) {}

    /// Validation run after loading. `None` skips validation.
    fn validate(&self, _config: &Self::Config, _config_file: &Path) -> Option<ValidationResult> {
        None
    }
}

/// Memoizing loader for one configuration file.
///
/// The first successful [`load_config`](Self::load_config) is cached for the
/// lifetime of the manager; later calls return the same `Arc` without
/// touching the filesystem, even if the file has changed since. A failed
/// load or failed validation leaves the cache empty so the next call retries.
///
/// The cache lock is held for the whole load, so concurrent callers on one
/// manager trigger a single read.
#[derive(Debug)]
pub struct ConfigManager<P: DistributionPolicy> {
    config_path: PathBuf,
    policy: P,
    cache: Mutex<Option<Arc<P::Config>>>
}

impl<P: DistributionPolicy> ConfigManager<P> {
    pub fn new(config_path: impl Into<PathBuf>, policy: P) -> Self {
        Self {
            config_path: config_path.into(),
            policy,
            cache: Mutex::new(None)
        }
    }

    pub fn load_config(&self) -> ConfigResult<Arc<P::Config>> {
        let mut cache = self.cache.lock();
        if let Some(config) = cache.as_ref() {
            debug!(
                distribution = self.policy.name(),
                path = %self.config_path.display(),
                "config cache hit"
            );
            return Ok(Arc::clone(config));
        }

        let mut config = file_loader::load(&self.config_path, || self.policy.create_default())?;
        self.policy.normalize(&mut config);

        if let Some(result) = self.policy.validate(&config, &self.config_path) {
            if !result.is_valid() {
                warn!(
                    distribution = self.policy.name(),
                    errors = result.errors().len(),
                    "config validation failed"
                );
                return Err(ConfigError::Validation {
                    distribution: self.policy.name(),
                    result: Box::new(result)
                });
            }
            for warning in result.warnings() {
                warn!(distribution = self.policy.name(), %warning, "config validation warning");
            }
        }

        let config = Arc::new(config);
        *cache = Some(Arc::clone(&config));
        info!(
            distribution = self.policy.name(),
            path = %self.config_path.display(),
            "loaded config"
        );
        Ok(config)
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.lock().is_some()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;
    use validation::ValidationError;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Sample {
        name: String,
        replicas: u32
    }

    #[derive(Default)]
    struct SamplePolicy {
        reject_zero: bool,
        normalized: AtomicUsize
    }

    impl DistributionPolicy for SamplePolicy {
        type Config = Sample;

        fn name(&self) -> &'static str {
            "Sample"
        }

        fn create_default(&self) -> Sample {
            Sample {
                name: "default".to_string(),
                replicas: 1
            }
        }

        fn normalize(&self, _config: &mut Sample) {
            self.normalized.fetch_add(1, Ordering::SeqCst);
        }

        fn validate(&self, config: &Sample, config_file: &Path) -> Option<ValidationResult> {
            if !self.reject_zero {
                return None;
            }
            let mut result = ValidationResult::new(config_file.display().to_string());
            if config.replicas == 0 {
                result.add_error(ValidationError::new("replicas", "must be positive"));
            }
            Some(result)
        }
    }

    #[test]
    fn test_missing_file_loads_default_and_caches() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::new(temp.path().join("sample.yaml"), SamplePolicy::default());
        assert!(!manager.is_loaded());

        let first = manager.load_config().unwrap();
        assert_eq!(first.name, "default");
        assert!(manager.is_loaded());

        let second = manager.load_config().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(manager.policy().normalized.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_validation_failure_is_not_cached() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sample.yaml");
        fs::write(&path, "replicas: 0\n").unwrap();

        let policy = SamplePolicy {
            reject_zero: true,
            ..SamplePolicy::default()
        };
        let manager = ConfigManager::new(&path, policy);

        let err = manager.load_config().unwrap_err();
        let result = err.validation_result().unwrap();
        assert_eq!(result.errors()[0].field(), "replicas");
        assert!(!manager.is_loaded());

        fs::write(&path, "replicas: 3\n").unwrap();
        let config = manager.load_config().unwrap();
        assert_eq!(config.replicas, 3);
        assert_eq!(config.name, "default");
    }

    #[test]
    fn test_concurrent_callers_share_one_load() {
        let temp = TempDir::new().unwrap();
        let manager = Arc::new(ConfigManager::new(
            temp.path().join("sample.yaml"),
            SamplePolicy::default(),
        ));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let manager = Arc::clone(&manager);
                std::thread::spawn(move || manager.load_config().unwrap())
            })
            .collect();
        let loaded: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(loaded.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
        assert_eq!(manager.policy().normalized.load(Ordering::SeqCst), 1);
    }
}
