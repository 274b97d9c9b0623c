//! Validator for Kind cluster documents.

use apis::KIND_DEFAULTS;
use apis::kind::{self, Cluster};
use serde_json::json;
use tracing::debug;

use crate::Validator;
use crate::result::{ValidationError, ValidationResult};
use crate::upstream;

/// Requires at least one control-plane node, then defers to Kind's own rules.
#[derive(Debug, Clone)]
pub struct KindValidator {
    config_file: String
}

impl KindValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_file(mut self, config_file: impl Into<String>) -> Self {
        self.config_file = config_file.into();
        self
    }
}

impl Default for KindValidator {
    fn default() -> Self {
        Self {
            config_file: KIND_DEFAULTS.config_file.to_string()
        }
    }
}

impl Validator<Cluster> for KindValidator {
    fn validate(&self, config: Option<&Cluster>) -> ValidationResult {
        let mut result = ValidationResult::new(&self.config_file);
        let Some(config) = config else {
            result.add_error(ValidationError::nil_config("Kind"));
            return result;
        };

        let control_planes = config.control_plane_count();
        if control_planes == 0 {
            result.add_error(
                ValidationError::new("nodes", "at least one control-plane node is required")
                    .with_current(json!(control_planes))
                    .with_expected(json!(">= 1 control-plane node"))
                    .with_fix("Add a node with 'role: control-plane' to the nodes list"),
            );
        }

        if result.is_valid() {
            upstream::delegate(&mut result, &KIND_DEFAULTS, config, |copy| {
                kind::set_defaults(copy);
                kind::validate(copy)
            });
        }

        debug!(file = %self.config_file, valid = result.is_valid(), "validated Kind config");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apis::kind::Node;

    #[test]
    fn test_nil_config() {
        let result = KindValidator::new().validate(None);
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].field(), "config");
    }

    #[test]
    fn test_no_control_plane_is_a_single_nodes_error() {
        let cluster = Cluster {
            nodes: vec![Node::worker()],
            ..Cluster::default()
        };
        let result = KindValidator::new().validate(Some(&cluster));

        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].field(), "nodes");
    }

    #[test]
    fn test_empty_nodes_is_a_single_nodes_error() {
        let result = KindValidator::new().validate(Some(&Cluster::default()));
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].field(), "nodes");
    }

    #[test]
    fn test_valid_cluster_passes_upstream() {
        let cluster = Cluster {
            name: "dev".to_string(),
            nodes: vec![Node::control_plane(), Node::worker()],
            ..Cluster::default()
        };
        let result = KindValidator::new().validate(Some(&cluster));
        assert!(result.is_valid(), "{}", result.format_errors());
        assert_eq!(result.config_file(), "kind.yaml");
    }

    #[test]
    fn test_upstream_failure_is_wrapped() {
        let mut cluster = Cluster {
            nodes: vec![Node::control_plane()],
            ..Cluster::default()
        };
        cluster.networking.service_subnet = "garbage".to_string();

        let result = KindValidator::new()
            .with_config_file("clusters/kind.yaml")
            .validate(Some(&cluster));

        assert_eq!(result.errors().len(), 1);
        let err = &result.errors()[0];
        assert_eq!(err.field(), "config");
        assert!(err.message().contains("networking.serviceSubnet"));
        assert!(err.fix_suggestion().is_some());
        assert_eq!(result.config_file(), "clusters/kind.yaml");
    }

    #[test]
    fn test_caller_document_is_not_defaulted() {
        let cluster = Cluster {
            nodes: vec![Node::control_plane()],
            ..Cluster::default()
        };
        let _ = KindValidator::new().validate(Some(&cluster));
        assert!(cluster.networking.pod_subnet.is_empty());
    }
}
