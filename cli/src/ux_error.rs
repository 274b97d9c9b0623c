use std::path::Path;

use colored::Colorize;
use config::ConfigError;

#[derive(Debug)]
pub struct UxError {
    pub what: String,
    pub why: Option<String>,
    pub how_to_fix: Vec<String>,
    pub suggested_command: Option<String>,
}

impl UxError {
    pub fn new(what: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            why: None,
            how_to_fix: Vec::new(),
            suggested_command: None,
        }
    }

    pub fn why(mut self, reason: impl Into<String>) -> Self {
        self.why = Some(reason.into());
        self
    }

    pub fn fix(mut self, suggestion: impl Into<String>) -> Self {
        self.how_to_fix.push(suggestion.into());
        self
    }

    pub fn suggest(mut self, cmd: impl Into<String>) -> Self {
        self.suggested_command = Some(cmd.into());
        self
    }

    pub fn display(&self) {
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), self.what.white().bold());

        if let Some(why) = &self.why {
            eprintln!("       {}", why.dimmed());
        }

        if !self.how_to_fix.is_empty() {
            eprintln!();
            eprintln!("{}", "How to fix:".yellow().bold());
            for (i, fix) in self.how_to_fix.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, fix);
            }
        }

        if let Some(cmd) = &self.suggested_command {
            eprintln!();
            eprintln!("{}", "Try this:".green().bold());
            eprintln!("  $ {}", cmd.cyan());
        }
        eprintln!();
    }
}

impl std::fmt::Display for UxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.what)
    }
}

impl std::error::Error for UxError {}

/// Turn a load failure into something a user can act on.
pub fn config_load_failed(requested: &Path, err: &ConfigError) -> UxError {
    let base = UxError::new(format!(
        "Could not load configuration '{}'",
        requested.display()
    ));
    match err {
        ConfigError::PathResolution { .. } => base
            .why(err.to_string())
            .fix("Run ksail from an existing directory")
            .fix("Or pass an absolute path with --config"),
        ConfigError::FileRead { path, .. } => base
            .why(err.to_string())
            .fix(format!("Check that {} is a readable file", path.display()))
            .suggest(format!("ls -l {}", path.display())),
        ConfigError::Deserialization { .. } => base
            .why(err.to_string())
            .fix("Fix the YAML syntax or the field types reported above")
            .suggest("ksail config"),
        ConfigError::Seed { .. } => base.why(err.to_string()),
        ConfigError::Validation { result, .. } => {
            let mut ux = base.why(err.to_string());
            for finding in result.errors() {
                if let Some(fix) = finding.fix_suggestion() {
                    ux = ux.fix(fix);
                }
            }
            ux.suggest("ksail validate")
        }
    }
}

pub fn unsupported_distribution(distribution: &str) -> UxError {
    UxError::new(format!("No distribution config for '{}'", distribution))
        .why(format!(
            "Supported distributions are: {}",
            apis::Distribution::supported_list()
        ))
        .fix("Set spec.distribution in ksail.yaml to a supported distribution")
        .suggest("ksail validate")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use validation::{ValidationError, ValidationResult};

    #[test]
    fn test_ux_error_new() {
        let err = UxError::new("test error");
        assert_eq!(err.what, "test error");
        assert!(err.why.is_none());
        assert!(err.how_to_fix.is_empty());
        assert!(err.suggested_command.is_none());
    }

    #[test]
    fn test_ux_error_builder_chain() {
        let err = UxError::new("test error")
            .why("because reasons")
            .fix("try this")
            .fix("or this")
            .suggest("run command");

        assert_eq!(err.how_to_fix, vec!["try this", "or this"]);
        assert_eq!(err.suggested_command, Some("run command".to_string()));
        assert_eq!(format!("{}", err), "test error");
    }

    #[test]
    fn test_read_failure_points_at_file() {
        let err = ConfigError::FileRead {
            path: PathBuf::from("/tmp/kind.yaml"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let ux = config_load_failed(Path::new("kind.yaml"), &err);
        assert!(ux.what.contains("kind.yaml"));
        assert!(ux.how_to_fix[0].contains("/tmp/kind.yaml"));
    }

    #[test]
    fn test_validation_failure_carries_fixes() {
        let mut result = ValidationResult::new("eks.yaml");
        result.add_error(
            ValidationError::new("metadata.region", "AWS region is required")
                .with_fix("Set metadata.region"),
        );
        let err = ConfigError::Validation {
            distribution: "EKS",
            result: Box::new(result),
        };

        let ux = config_load_failed(Path::new("eks.yaml"), &err);
        assert_eq!(ux.how_to_fix, vec!["Set metadata.region"]);
        assert_eq!(ux.suggested_command, Some("ksail validate".to_string()));
    }

    #[test]
    fn test_unsupported_distribution_lists_supported() {
        let ux = unsupported_distribution("Tind");
        assert!(ux.why.unwrap().contains("Kind, K3d, EKS"));
    }
}
