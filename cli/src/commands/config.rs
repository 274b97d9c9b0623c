//! Config command - print the effective configuration
//!
//! Shows `ksail.yaml` and its distribution config as they look after
//! defaults are applied, which is what every other command works with.

use std::sync::Arc;

use ::config::{ConfigManager, LoadedDocument, load_distribution, resolve_path};
use anyhow::Result;
use apis::{eks, k3d, kind, ksail};
use clap::Args;
use serde::Serialize;
use tracing::debug;

use super::{GlobalArgs, OutputFormat};
use crate::{output, ux_error};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Only print ksail.yaml, skip the distribution config
    #[arg(long)]
    pub cluster_only: bool
}

#[derive(Serialize)]
#[serde(untagged)]
enum DistributionConfig {
    Kind(kind::Cluster),
    K3d(k3d::SimpleConfig),
    Eks(eks::ClusterConfig)
}

impl From<LoadedDocument> for DistributionConfig {
    fn from(document: LoadedDocument) -> Self {
        match document {
            LoadedDocument::Kind(config) => Self::Kind(Arc::unwrap_or_clone(config)),
            LoadedDocument::K3d(config) => Self::K3d(Arc::unwrap_or_clone(config)),
            LoadedDocument::Eks(config) => Self::Eks(Arc::unwrap_or_clone(config))
        }
    }
}

#[derive(Serialize)]
struct Effective<'a> {
    cluster: &'a ksail::Cluster,
    #[serde(skip_serializing_if = "Option::is_none")]
    distribution: Option<DistributionConfig>
}

pub fn run(global: &GlobalArgs, args: &ConfigArgs) -> Result<()> {
    debug!(
        config = %global.config.display(),
        cluster_only = args.cluster_only,
        "showing effective config"
    );
    if !resolve_path(&global.config)?.exists() {
        output::info(&format!(
            "{} not found, showing defaults",
            global.config.display()
        ));
    }

    let cluster = match ConfigManager::cluster(&global.config).load_config() {
        Ok(cluster) => cluster,
        Err(err) => {
            ux_error::config_load_failed(&global.config, &err).display();
            std::process::exit(1);
        }
    };

    let distribution = if args.cluster_only {
        None
    } else {
        match load_distribution(&cluster) {
            Ok(Some(document)) => Some(DistributionConfig::from(document)),
            Ok(None) => {
                ux_error::unsupported_distribution(&cluster.spec.distribution).display();
                None
            }
            Err(err) => {
                let requested = std::path::Path::new(&cluster.spec.distribution_config);
                ux_error::config_load_failed(requested, &err).display();
                std::process::exit(1);
            }
        }
    };

    let effective = Effective {
        cluster: cluster.as_ref(),
        distribution
    };

    match global.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&effective)?),
        OutputFormat::Text => {
            print!("{}", serde_yaml::to_string(effective.cluster)?);
            if let Some(distribution) = &effective.distribution {
                println!("---");
                print!("{}", serde_yaml::to_string(distribution)?);
            }
        }
    }
    Ok(())
}
