//! K3d simple config document (`k3d.io/v1alpha5`, kind `Simple`).

use std::sync::LazyLock;

use errors::SchemaError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{Distribution, DistributionDocument, ObjectMeta, TypeMeta, schema_errors};

pub const DEFAULT_IMAGE: &str = "rancher/k3s:latest";

static DNS_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("DNS label pattern is valid")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct SimpleConfig {
    #[serde(flatten)]
    pub type_meta: TypeMeta,

    #[validate(custom(function = "validate_metadata"))]
    pub metadata: ObjectMeta,

    #[validate(range(min = 1, message = "at least one server is required"))]
    pub servers: u32,

    pub agents: u32,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub network: String,

    #[serde(rename = "kubeAPI")]
    #[validate(nested)]
    pub kube_api: KubeApi
}

impl DistributionDocument for SimpleConfig {
    fn distribution(&self) -> Distribution {
        Distribution::K3d
    }

    fn type_meta(&self) -> &TypeMeta {
        &self.type_meta
    }

    fn cluster_name(&self) -> Option<&str> {
        Some(self.metadata.name.as_str()).filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct KubeApi {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host: String,

    #[serde(rename = "hostIP", skip_serializing_if = "String::is_empty")]
    pub host_ip: String,

    #[serde(rename = "hostPort", skip_serializing_if = "String::is_empty")]
    #[validate(custom(function = "validate_host_port"))]
    pub host_port: String
}

fn validate_metadata(metadata: &ObjectMeta) -> Result<(), validator::ValidationError> {
    let name = metadata.name.as_str();
    if name.is_empty() || (name.len() <= 63 && DNS_LABEL.is_match(name)) {
        return Ok(());
    }
    Err(validator::ValidationError::new("dns_label").with_message(
        format!("name '{name}' must be a lowercase DNS label of at most 63 characters").into(),
    ))
}

fn validate_host_port(value: &str) -> Result<(), validator::ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    match value.parse::<u16>() {
        Ok(port) if port > 0 => Ok(()),
        _ => Err(validator::ValidationError::new("port")
            .with_message(format!("'{value}' is not a port between 1 and 65535").into()))
    }
}

/// Fill the fields K3d defaults when a cluster is created.
pub fn set_defaults(config: &mut SimpleConfig) {
    if config.servers == 0 {
        config.servers = 1;
    }
    if config.image.is_empty() {
        config.image = DEFAULT_IMAGE.to_string();
    }
}

/// K3d's own validation of a simple config document.
pub fn validate(config: &SimpleConfig) -> Result<(), SchemaError> {
    match Validate::validate(config) {
        Ok(()) => Ok(()),
        Err(errors) => SchemaError::collect(schema_errors(&errors))
    }
}
