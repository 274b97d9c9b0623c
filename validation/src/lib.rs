//! # Configuration Validation
//!
//! Structured validation for ksail configuration documents.
//!
//! This crate provides:
//! - [`ValidationResult`], an accumulator of field-level errors and warnings
//! - One validator per distribution ([`KindValidator`], [`K3dValidator`],
//!   [`EksValidator`]) that checks required fields and then hands a copy of
//!   the document to the distribution's own schema routine
//! - [`ClusterValidator`], which checks that the top-level document agrees
//!   with the distribution document it references
//!
//! Validators never fail as control flow: every finding lands in the
//! returned [`ValidationResult`] and the caller decides what is fatal.

pub mod cluster;
pub mod eks;
pub mod k3d;
pub mod kind;
pub mod result;
mod upstream;

pub use cluster::ClusterValidator;
pub use eks::EksValidator;
pub use k3d::K3dValidator;
pub use kind::KindValidator;
pub use result::{FileLocation, ValidationError, ValidationResult};

/// Validates one kind of configuration document.
///
/// `None` stands for a missing document and always yields a single error on
/// field `"config"`.
pub trait Validator<T: ?Sized> {
    fn validate(&self, config: Option<&T>) -> ValidationResult;
}
