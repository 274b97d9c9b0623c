//! Distribution policies for [`ConfigManager`].

use std::path::{Path, PathBuf};

use apis::{EKS_DEFAULTS, K3D_DEFAULTS, KIND_DEFAULTS, eks, k3d, kind, ksail};
use validation::{EksValidator, K3dValidator, KindValidator, ValidationResult, Validator};

use crate::manager::{ConfigManager, DistributionPolicy};

/// Kind documents: stamped, defaulted by Kind's own routine, then validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct KindPolicy;

impl DistributionPolicy for KindPolicy {
    type Config = kind::Cluster;

    fn name(&self) -> &'static str {
        "Kind"
    }

    fn create_default(&self) -> kind::Cluster {
        kind::Cluster {
            type_meta: KIND_DEFAULTS.type_meta(),
            ..kind::Cluster::default()
        }
    }

    fn normalize(&self, config: &mut kind::Cluster) {
        config
            .type_meta
            .fill_missing(KIND_DEFAULTS.api_version, KIND_DEFAULTS.kind);
        kind::set_defaults(config);
    }

    fn validate(&self, config: &kind::Cluster, config_file: &Path) -> Option<ValidationResult> {
        let validator = KindValidator::new().with_config_file(config_file.display().to_string());
        Some(validator.validate(Some(config)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct K3dPolicy;

impl DistributionPolicy for K3dPolicy {
    type Config = k3d::SimpleConfig;

    fn name(&self) -> &'static str {
        "K3d"
    }

    fn create_default(&self) -> k3d::SimpleConfig {
        k3d::SimpleConfig {
            type_meta: K3D_DEFAULTS.type_meta(),
            ..k3d::SimpleConfig::default()
        }
    }

    fn normalize(&self, config: &mut k3d::SimpleConfig) {
        config
            .type_meta
            .fill_missing(K3D_DEFAULTS.api_version, K3D_DEFAULTS.kind);
        k3d::set_defaults(config);
    }

    fn validate(&self, config: &k3d::SimpleConfig, config_file: &Path) -> Option<ValidationResult> {
        let validator = K3dValidator::new().with_config_file(config_file.display().to_string());
        Some(validator.validate(Some(config)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EksPolicy;

impl DistributionPolicy for EksPolicy {
    type Config = eks::ClusterConfig;

    fn name(&self) -> &'static str {
        "EKS"
    }

    fn create_default(&self) -> eks::ClusterConfig {
        eks::ClusterConfig {
            type_meta: EKS_DEFAULTS.type_meta(),
            metadata: eks::ClusterMeta {
                name: EKS_DEFAULTS.default_name.to_string(),
                region: eks::DEFAULT_REGION.to_string(),
                ..eks::ClusterMeta::default()
            },
            ..eks::ClusterConfig::default()
        }
    }

    fn normalize(&self, config: &mut eks::ClusterConfig) {
        config
            .type_meta
            .fill_missing(EKS_DEFAULTS.api_version, EKS_DEFAULTS.kind);
        eks::set_defaults(config);
    }

    fn validate(&self, config: &eks::ClusterConfig, config_file: &Path) -> Option<ValidationResult> {
        let validator = EksValidator::new().with_config_file(config_file.display().to_string());
        Some(validator.validate(Some(config)))
    }
}

/// Top-level `ksail.yaml`. Not validated at load: cross-document checks need
/// the distribution document too, see [`validation::ClusterValidator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterPolicy;

impl DistributionPolicy for ClusterPolicy {
    type Config = ksail::Cluster;

    fn name(&self) -> &'static str {
        "ksail"
    }

    fn create_default(&self) -> ksail::Cluster {
        ksail::Cluster::with_defaults()
    }

    fn normalize(&self, config: &mut ksail::Cluster) {
        config.type_meta.fill_missing(ksail::API_VERSION, ksail::KIND);
    }
}

pub type KindConfigManager = ConfigManager<KindPolicy>;
pub type K3dConfigManager = ConfigManager<K3dPolicy>;
pub type EksConfigManager = ConfigManager<EksPolicy>;
pub type ClusterConfigManager = ConfigManager<ClusterPolicy>;

impl ConfigManager<KindPolicy> {
    pub fn kind(config_path: impl Into<PathBuf>) -> Self {
        Self::new(config_path, KindPolicy)
    }
}

impl ConfigManager<K3dPolicy> {
    pub fn k3d(config_path: impl Into<PathBuf>) -> Self {
        Self::new(config_path, K3dPolicy)
    }
}

impl ConfigManager<EksPolicy> {
    pub fn eks(config_path: impl Into<PathBuf>) -> Self {
        Self::new(config_path, EksPolicy)
    }
}

impl ConfigManager<ClusterPolicy> {
    pub fn cluster(config_path: impl Into<PathBuf>) -> Self {
        Self::new(config_path, ClusterPolicy)
    }
}
