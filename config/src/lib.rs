//! # Configuration System
//!
//! Loading, defaulting and caching of ksail configuration documents.
//!
//! This crate provides:
//! - Config path resolution that walks up from the working directory
//! - Generic YAML loading seeded from defaults (a missing file is not an error)
//! - [`ConfigManager`], one per distribution, caching the first good load
//! - Policies that stamp type headers, apply each distribution's own
//!   defaulting and validate on load
//!
//! # Example
//!
//! ```rust,no_run
//! use config::{ConfigManager, load_distribution_document};
//!
//! fn main() -> Result<(), config::ConfigError> {
//!     let cluster = ConfigManager::cluster("ksail.yaml").load_config()?;
//!     if let Some(document) = load_distribution_document(&cluster)? {
//!         println!("{:?} cluster {:?}", document.distribution(), document.cluster_name());
//!     }
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod error;
pub mod file_loader;
pub mod manager;
pub mod policy;
pub mod resolver;

pub use document::{LoadedDocument, load_distribution, load_distribution_document};
pub use error::{ConfigError, ConfigResult};
pub use file_loader::{from_yaml_over, load, merge_values};
pub use manager::{ConfigManager, DistributionPolicy};
pub use policy::{
    ClusterConfigManager, ClusterPolicy, EksConfigManager, EksPolicy, K3dConfigManager, K3dPolicy,
    KindConfigManager, KindPolicy,
};
pub use resolver::{resolve_path, resolve_path_from};
