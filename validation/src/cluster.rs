//! Consistency checks between the top-level `Cluster` document and the
//! distribution document it references.

use apis::ksail::{self, Cluster};
use apis::{Distribution, DistributionDefaults, DistributionDocument};
use serde_json::json;
use tracing::debug;

use crate::Validator;
use crate::result::{ValidationError, ValidationResult};

/// Cross-document validator for `ksail.yaml`.
///
/// Pure: holds no state between calls. The distribution documents passed to
/// [`ClusterValidator::validate_with`] may be of any family; only the one
/// matching `spec.distribution` is looked at.
#[derive(Debug, Clone)]
pub struct ClusterValidator {
    config_file: String,
    check_context: bool
}

impl ClusterValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_file(mut self, config_file: impl Into<String>) -> Self {
        self.config_file = config_file.into();
        self
    }

    /// Skip the context check, for when the distribution document could not
    /// be loaded and its cluster name is unknown. A non-empty context is
    /// reported as a warning instead.
    pub fn skip_context_check(mut self) -> Self {
        self.check_context = false;
        self
    }

    pub fn validate_with(
        &self,
        spec: Option<&Cluster>,
        documents: &[&dyn DistributionDocument],
    ) -> ValidationResult {
        let mut result = ValidationResult::new(&self.config_file);
        let Some(cluster) = spec else {
            result.add_error(ValidationError::nil_config("ksail cluster"));
            return result;
        };
        let spec = &cluster.spec;

        if spec.distribution.is_empty() {
            result.add_error(
                ValidationError::new("spec.distribution", "distribution is required")
                    .with_expected(Distribution::supported_list())
                    .with_fix(format!(
                        "Set spec.distribution to one of: {}",
                        Distribution::supported_list()
                    )),
            );
        }

        if spec.distribution_config.is_empty() {
            result.add_error(
                ValidationError::new(
                    "spec.distributionConfig",
                    "distribution config file is required",
                )
                .with_fix(
                    "Set spec.distributionConfig to the distribution config file, e.g. kind.yaml",
                ),
            );
        } else if !is_yaml_file(&spec.distribution_config) {
            result.add_warning(
                ValidationError::new(
                    "spec.distributionConfig",
                    format!(
                        "'{}' does not look like a YAML file",
                        spec.distribution_config
                    ),
                )
                .with_current(spec.distribution_config.as_str())
                .with_fix("Use a .yaml or .yml file for the distribution config"),
            );
        }

        if spec.distribution.is_empty() {
            return result;
        }
        let Some(defaults) = supported_defaults(&spec.distribution, &mut result) else {
            return result;
        };

        let document = documents
            .iter()
            .copied()
            .find(|document| document.distribution() == defaults.distribution);

        if let Some(document) = document {
            check_type_meta(defaults, document, &mut result);
        }

        if self.check_context {
            let name = identity_name(defaults, document);
            check_context(defaults, &name, &spec.connection, &mut result);
        } else if !spec.connection.context.is_empty() {
            result.add_warning(
                ValidationError::new(
                    "spec.connection.context",
                    format!(
                        "context not checked: the {} config failed to load",
                        defaults.distribution
                    ),
                )
                .with_current(spec.connection.context.as_str()),
            );
        }

        debug!(
            file = %self.config_file,
            distribution = %defaults.distribution,
            valid = result.is_valid(),
            "validated cluster config"
        );
        result
    }
}

impl Default for ClusterValidator {
    fn default() -> Self {
        Self {
            config_file: ksail::CONFIG_FILE.to_string(),
            check_context: true
        }
    }
}

impl Validator<Cluster> for ClusterValidator {
    fn validate(&self, config: Option<&Cluster>) -> ValidationResult {
        self.validate_with(config, &[])
    }
}

/// Parse `spec.distribution`, recording why it is unusable when it is.
fn supported_defaults(
    distribution: &str,
    result: &mut ValidationResult,
) -> Option<&'static DistributionDefaults> {
    let fix = format!(
        "Use a supported distribution: {}",
        Distribution::supported_list()
    );
    match distribution.parse::<Distribution>() {
        Ok(parsed) => {
            let defaults = parsed.defaults();
            if defaults.is_none() {
                result.add_error(
                    ValidationError::new(
                        "spec.distribution",
                        format!("distribution '{parsed}' is not yet supported"),
                    )
                    .with_current(distribution)
                    .with_expected(Distribution::supported_list())
                    .with_fix(fix),
                );
            }
            defaults
        }
        Err(_) => {
            result.add_error(
                ValidationError::new(
                    "spec.distribution",
                    format!("unknown distribution '{distribution}'"),
                )
                .with_current(distribution)
                .with_expected(Distribution::supported_list())
                .with_fix(fix),
            );
            None
        }
    }
}

/// Cluster name from the matching document, or the family default.
fn identity_name(
    defaults: &DistributionDefaults,
    document: Option<&dyn DistributionDocument>,
) -> String {
    document
        .and_then(|document| document.cluster_name())
        .filter(|name| !name.is_empty())
        .unwrap_or(defaults.default_name)
        .to_string()
}

fn check_context(
    defaults: &DistributionDefaults,
    name: &str,
    connection: &ksail::Connection,
    result: &mut ValidationResult,
) {
    if connection.context.is_empty() {
        return;
    }
    let Some(expected) = defaults.expected_context(name) else {
        return;
    };
    if connection.context == expected {
        return;
    }

    result.add_error(
        ValidationError::new(
            "spec.connection.context",
            format!(
                "context '{}' does not match expected '{expected}' for {} cluster '{name}'",
                connection.context, defaults.distribution
            ),
        )
        .with_current(connection.context.as_str())
        .with_expected(expected.as_str())
        .with_fix(format!("Set spec.connection.context to '{expected}'")),
    );
}

fn check_type_meta(
    defaults: &DistributionDefaults,
    document: &dyn DistributionDocument,
    result: &mut ValidationResult,
) {
    let meta = document.type_meta();
    if meta.is_empty() || meta.matches(defaults.api_version, defaults.kind) {
        return;
    }
    result.add_warning(
        ValidationError::new(
            "spec.distributionConfig",
            format!(
                "{} document declares '{meta}', expected '{}'",
                defaults.distribution,
                defaults.type_meta()
            ),
        )
        .with_current(json!({ "apiVersion": meta.api_version, "kind": meta.kind }))
        .with_expected(json!({ "apiVersion": defaults.api_version, "kind": defaults.kind })),
    );
}

fn is_yaml_file(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".yaml") || lower.ends_with(".yml")
}
