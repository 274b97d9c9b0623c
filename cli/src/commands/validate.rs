//! Validate command
//!
//! Loads `ksail.yaml` and the distribution config it references, then runs
//! the cross-document checks. Exits with status 1 when anything is invalid.

use std::sync::Arc;

use anyhow::Result;
use apis::DistributionDocument;
use clap::Args;
use config::{ConfigError, ConfigManager, load_distribution_document};
use serde::Serialize;
use tracing::debug;
use validation::{ClusterValidator, ValidationResult};

use super::{GlobalArgs, OutputFormat};
use crate::{output, ux_error};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Fail on warnings (exit code 1)
    #[arg(long)]
    pub strict: bool
}

#[derive(Serialize)]
struct Report<'a> {
    valid: bool,
    results: &'a [ValidationResult]
}

pub fn run(global: &GlobalArgs, args: &ValidateArgs) -> Result<()> {
    debug!(config = %global.config.display(), strict = args.strict, "validating configuration");

    let cluster = match ConfigManager::cluster(&global.config).load_config() {
        Ok(cluster) => cluster,
        Err(err) => {
            ux_error::config_load_failed(&global.config, &err).display();
            std::process::exit(1);
        }
    };

    let mut results = Vec::new();
    let mut validator =
        ClusterValidator::new().with_config_file(global.config.display().to_string());
    let document: Option<Arc<dyn DistributionDocument>> =
        match load_distribution_document(&cluster) {
            Ok(document) => document,
            Err(ConfigError::Validation {
                distribution,
                result
            }) => {
                debug!(distribution, "distribution config invalid, skipping context check");
                results.push(*result);
                validator = validator.skip_context_check();
                None
            }
            Err(err) => {
                let requested = std::path::Path::new(&cluster.spec.distribution_config);
                ux_error::config_load_failed(requested, &err).display();
                std::process::exit(1);
            }
        };

    let documents: Vec<&dyn DistributionDocument> = document.as_deref().into_iter().collect();
    let cross = validator.validate_with(Some(&*cluster), &documents);
    results.insert(0, cross);

    let valid = results
        .iter()
        .all(|result| result.is_valid() && !(args.strict && result.has_warnings()));

    match global.output {
        OutputFormat::Json => {
            let report = Report {
                valid,
                results: &results
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            output::header("Configuration Validation");
            println!();
            for result in &results {
                output::validation_result(result);
                println!();
            }
            if valid {
                output::success("configuration is valid");
            } else {
                output::error("configuration is invalid");
            }
        }
    }

    if !valid {
        std::process::exit(1);
    }
    Ok(())
}
