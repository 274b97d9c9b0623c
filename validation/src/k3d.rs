//! Validator for K3d simple config documents.

use apis::K3D_DEFAULTS;
use apis::k3d::{self, SimpleConfig};
use tracing::debug;

use crate::Validator;
use crate::result::{ValidationError, ValidationResult};
use crate::upstream;

/// K3d has no ksail-specific required fields; everything is K3d's own rules.
#[derive(Debug, Clone)]
pub struct K3dValidator {
    config_file: String
}

impl K3dValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_file(mut self, config_file: impl Into<String>) -> Self {
        self.config_file = config_file.into();
        self
    }
}

impl Default for K3dValidator {
    fn default() -> Self {
        Self {
            config_file: K3D_DEFAULTS.config_file.to_string()
        }
    }
}

impl Validator<SimpleConfig> for K3dValidator {
    fn validate(&self, config: Option<&SimpleConfig>) -> ValidationResult {
        let mut result = ValidationResult::new(&self.config_file);
        let Some(config) = config else {
            result.add_error(ValidationError::nil_config("K3d"));
            return result;
        };

        upstream::delegate(&mut result, &K3D_DEFAULTS, config, |copy| {
            k3d::set_defaults(copy);
            k3d::validate(copy)
        });

        debug!(file = %self.config_file, valid = result.is_valid(), "validated K3d config");
        result
    }
}
