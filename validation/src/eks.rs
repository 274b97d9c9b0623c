//! Validator for EKS cluster config documents.

use apis::EKS_DEFAULTS;
use apis::eks::{self, ClusterConfig};
use tracing::debug;

use crate::Validator;
use crate::result::{ValidationError, ValidationResult};
use crate::upstream;

/// Requires a cluster name and region, then defers to eksctl's own rules.
#[derive(Debug, Clone)]
pub struct EksValidator {
    config_file: String
}

impl EksValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_file(mut self, config_file: impl Into<String>) -> Self {
        self.config_file = config_file.into();
        self
    }
}

impl Default for EksValidator {
    fn default() -> Self {
        Self {
            config_file: EKS_DEFAULTS.config_file.to_string()
        }
    }
}

impl Validator<ClusterConfig> for EksValidator {
    fn validate(&self, config: Option<&ClusterConfig>) -> ValidationResult {
        let mut result = ValidationResult::new(&self.config_file);
        let Some(config) = config else {
            result.add_error(ValidationError::nil_config("EKS"));
            return result;
        };

        if config.metadata.name.is_empty() {
            result.add_error(
                ValidationError::new("metadata.name", "cluster name is required")
                    .with_current("")
                    .with_fix("Set metadata.name to the EKS cluster name"),
            );
        }
        if config.metadata.region.is_empty() {
            result.add_error(
                ValidationError::new("metadata.region", "AWS region is required")
                    .with_current("")
                    .with_fix("Set metadata.region, for example 'eu-west-1'"),
            );
        }

        if result.is_valid() {
            upstream::delegate(&mut result, &EKS_DEFAULTS, config, |copy| {
                eks::set_defaults(copy);
                eks::validate(copy)
            });
        }

        debug!(file = %self.config_file, valid = result.is_valid(), "validated EKS config");
        result
    }
}
