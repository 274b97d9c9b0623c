//! Top-level ksail `Cluster` document (`ksail.io/v1alpha1`).
//!
//! Names the distribution in use, points at its distribution-specific
//! document and records how client tools reach the running cluster.

use serde::{Deserialize, Serialize};

use crate::types::{Distribution, ObjectMeta, TypeMeta};

pub const API_VERSION: &str = "ksail.io/v1alpha1";
pub const KIND: &str = "Cluster";
pub const CONFIG_FILE: &str = "ksail.yaml";

pub const DEFAULT_DISTRIBUTION: &str = "Kind";
pub const DEFAULT_DISTRIBUTION_CONFIG: &str = "kind.yaml";
pub const DEFAULT_SOURCE_DIRECTORY: &str = "k8s";
pub const DEFAULT_KUBECONFIG: &str = "~/.kube/config";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    #[serde(flatten)]
    pub type_meta: TypeMeta,

    pub metadata: ObjectMeta,

    pub spec: Spec
}

impl Cluster {
    /// Default document with its type header stamped.
    pub fn with_defaults() -> Self {
        Self {
            type_meta: TypeMeta::new(API_VERSION, KIND),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Spec {
    /// Distribution name as written; parsed by [`Spec::parsed_distribution`].
    pub distribution: String,

    /// Path of the distribution-specific document.
    pub distribution_config: String,

    pub source_directory: String,

    pub connection: Connection
}

impl Spec {
    pub fn parsed_distribution(&self) -> Option<Distribution> {
        self.distribution.parse().ok()
    }
}

impl Default for Spec {
    fn default() -> Self {
        Self {
            distribution: DEFAULT_DISTRIBUTION.to_string(),
            distribution_config: DEFAULT_DISTRIBUTION_CONFIG.to_string(),
            source_directory: DEFAULT_SOURCE_DIRECTORY.to_string(),
            connection: Connection::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Connection {
    pub kubeconfig: String,

    /// Context client tools should select; empty skips the context check.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub context: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub timeout: String
}

impl Default for Connection {
    fn default() -> Self {
        Self {
            kubeconfig: DEFAULT_KUBECONFIG.to_string(),
            context: String::new(),
            timeout: String::new()
        }
    }
}
