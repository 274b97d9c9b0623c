//! Errors raised while loading a configuration document.

use std::path::PathBuf;

use validation::ValidationResult;

/// Configuration loading error.
///
/// A missing file is not an error: the loader falls back to defaults. Once a
/// file is known to exist, failing to read or parse it is fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to resolve config path {}: {source}", .path.display())]
    PathResolution {
        path: PathBuf,
        source: std::io::Error
    },

    #[error("Failed to read config file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Deserialization {
        path: PathBuf,
        source: serde_yaml::Error
    },

    #[error("Failed to prepare default {kind} configuration: {reason}")]
    Seed { kind: &'static str, reason: String },

    #[error("{distribution} configuration is invalid: {}", .result.summary())]
    Validation {
        distribution: &'static str,
        result: Box<ValidationResult>
    }
}

impl ConfigError {
    /// The validation findings, when this error came from validation.
    pub fn validation_result(&self) -> Option<&ValidationResult> {
        match self {
            Self::Validation { result, .. } => Some(result),
            _ => None
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
