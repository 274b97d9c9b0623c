//! # Ksail Errors
//!
//! Error types shared across the ksail configuration crates.
//!
//! Uses `thiserror` for structured error definitions with named fields, so
//! every message carries the field it is about.

use thiserror::Error;

/// Failure reported by a distribution's own schema routine.
///
/// Produced by the `validate` functions in the `apis` crate (the Kind, K3d
/// and EKS equivalents of the upstream `Validate` entry points).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error("{}", join_reasons(.0))]
    Multiple(Vec<SchemaError>)
}

impl SchemaError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into()
        }
    }

    /// Fold a list of findings into a single outcome.
    ///
    /// No findings is success, one finding is returned as-is, anything more
    /// is wrapped in [`SchemaError::Multiple`].
    pub fn collect(mut errors: Vec<SchemaError>) -> Result<(), SchemaError> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(Self::Multiple(errors))
        }
    }

    /// Number of individual findings carried by this error.
    pub fn count(&self) -> usize {
        match self {
            Self::Invalid { .. } => 1,
            Self::Multiple(errors) => errors.iter().map(SchemaError::count).sum()
        }
    }
}

fn join_reasons(errors: &[SchemaError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
