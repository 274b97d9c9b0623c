//! Hand-off to a distribution's own schema routine.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use apis::DistributionDefaults;
use errors::SchemaError;
use tracing::{debug, warn};

use crate::result::{ValidationError, ValidationResult};

/// Run `check` against a private copy of `config`.
///
/// The routine may mutate its copy (defaulting before validation is common
/// upstream); the caller's document is never touched. A returned error or a
/// panic is recorded as one error on field `"config"` pointing at the
/// distribution's schema documentation.
pub(crate) fn delegate<T, F>(
    result: &mut ValidationResult,
    defaults: &DistributionDefaults,
    config: &T,
    check: F,
) where
    T: Clone,
    F: FnOnce(&mut T) -> Result<(), SchemaError>,
{
    let mut copy = config.clone();
    let family = defaults.distribution;

    match panic::catch_unwind(AssertUnwindSafe(move || check(&mut copy))) {
        Ok(Ok(())) => debug!(%family, "upstream validation passed"),
        Ok(Err(err)) => {
            debug!(%family, findings = err.count(), "upstream validation failed");
            result.add_error(
                ValidationError::new(
                    "config",
                    format!("{family} configuration validation failed: {err}"),
                )
                .with_fix(schema_hint(defaults)),
            );
        }
        Err(payload) => {
            let reason = panic_reason(payload.as_ref());
            warn!(%family, %reason, "upstream validator panicked");
            result.add_error(
                ValidationError::new(
                    "config",
                    format!("{family} configuration validator panicked: {reason}"),
                )
                .with_fix(schema_hint(defaults)),
            );
        }
    }
}

fn schema_hint(defaults: &DistributionDefaults) -> String {
    format!(
        "Check the {} configuration against the schema at {}",
        defaults.distribution, defaults.schema_docs
    )
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
