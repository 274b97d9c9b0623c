//! Kind cluster document (`kind.x-k8s.io/v1alpha4`, kind `Cluster`).

use std::net::IpAddr;

use errors::SchemaError;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

use crate::types::{Distribution, DistributionDocument, TypeMeta, schema_errors};

pub const DEFAULT_IP_FAMILY: &str = "ipv4";
pub const DEFAULT_POD_SUBNET: &str = "10.244.0.0/16";
pub const DEFAULT_SERVICE_SUBNET: &str = "10.96.0.0/16";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Cluster {
    #[serde(flatten)]
    pub type_meta: TypeMeta,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub nodes: Vec<Node>,

    #[validate(nested)]
    pub networking: Networking
}

impl Cluster {
    pub fn control_plane_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.role == NodeRole::ControlPlane)
            .count()
    }
}

impl DistributionDocument for Cluster {
    fn distribution(&self) -> Distribution {
        Distribution::Kind
    }

    fn type_meta(&self) -> &TypeMeta {
        &self.type_meta
    }

    fn cluster_name(&self) -> Option<&str> {
        Some(self.name.as_str()).filter(|name| !name.is_empty())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NodeRole {
    #[default]
    ControlPlane,
    Worker
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Node {
    pub role: NodeRole,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "image must not be empty when set"))]
    pub image: Option<String>
}

impl Node {
    pub fn control_plane() -> Self {
        Self {
            role: NodeRole::ControlPlane,
            image: None
        }
    }

    pub fn worker() -> Self {
        Self {
            role: NodeRole::Worker,
            image: None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct Networking {
    #[serde(skip_serializing_if = "String::is_empty")]
    #[validate(custom(function = "validate_ip_family"))]
    pub ip_family: String,

    /// `0` picks a random port, `-1` lets the host decide.
    #[validate(range(min = -1, max = 65535, message = "must be between -1 and 65535"))]
    pub api_server_port: i32,

    #[serde(skip_serializing_if = "String::is_empty")]
    #[validate(custom(function = "validate_cidr"))]
    pub pod_subnet: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    #[validate(custom(function = "validate_cidr"))]
    pub service_subnet: String,

    #[serde(rename = "disableDefaultCNI")]
    pub disable_default_cni: bool
}

fn validate_ip_family(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "" | "ipv4" | "ipv6" | "dual" => Ok(()),
        _ => Err(validator::ValidationError::new("ip_family")
            .with_message("must be one of ipv4, ipv6, dual".into()))
    }
}

fn validate_cidr(value: &str) -> Result<(), validator::ValidationError> {
    if value.is_empty() || is_cidr(value) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("cidr")
            .with_message(format!("'{value}' is not a valid CIDR").into()))
    }
}

fn is_cidr(value: &str) -> bool {
    let Some((address, prefix)) = value.split_once('/') else {
        return false;
    };
    let Ok(prefix) = prefix.parse::<u8>() else {
        return false;
    };
    match address.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => prefix <= 32,
        Ok(IpAddr::V6(_)) => prefix <= 128,
        Err(_) => false
    }
}

/// Fill the fields Kind defaults when a cluster is created.
pub fn set_defaults(cluster: &mut Cluster) {
    if cluster.nodes.is_empty() {
        cluster.nodes.push(Node::control_plane());
    }
    let networking = &mut cluster.networking;
    if networking.ip_family.is_empty() {
        networking.ip_family = DEFAULT_IP_FAMILY.to_string();
    }
    if networking.pod_subnet.is_empty() {
        networking.pod_subnet = DEFAULT_POD_SUBNET.to_string();
    }
    if networking.service_subnet.is_empty() {
        networking.service_subnet = DEFAULT_SERVICE_SUBNET.to_string();
    }
}

/// Kind's own validation of a cluster document.
pub fn validate(cluster: &Cluster) -> Result<(), SchemaError> {
    let mut findings = match Validate::validate(cluster) {
        Ok(()) => Vec::new(),
        Err(errors) => schema_errors(&errors)
    };

    if cluster.control_plane_count() == 0 {
        findings.push(SchemaError::invalid(
            "nodes",
            "must have at least one control-plane node",
        ));
    }

    SchemaError::collect(findings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_defaults_adds_control_plane() {
        let mut cluster = Cluster::default();
        set_defaults(&mut cluster);

        assert_eq!(cluster.nodes, vec![Node::control_plane()]);
        assert_eq!(cluster.networking.ip_family, "ipv4");
        assert_eq!(cluster.networking.pod_subnet, DEFAULT_POD_SUBNET);
        assert_eq!(cluster.networking.service_subnet, DEFAULT_SERVICE_SUBNET);
    }

    #[test]
    fn test_set_defaults_keeps_existing_nodes() {
        let mut cluster = Cluster {
            nodes: vec![Node::control_plane(), Node::worker()],
            ..Cluster::default()
        };
        set_defaults(&mut cluster);
        assert_eq!(cluster.nodes.len(), 2);
    }

    #[test]
    fn test_validate_defaulted_cluster() {
        let mut cluster = Cluster::default();
        set_defaults(&mut cluster);
        assert!(validate(&cluster).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_subnet_and_port() {
        let mut cluster = Cluster::default();
        set_defaults(&mut cluster);
        cluster.networking.pod_subnet = "10.244.0.0".to_string();
        cluster.networking.api_server_port = 70000;

        let err = validate(&cluster).unwrap_err();
        assert_eq!(err.count(), 2);
        let message = err.to_string();
        assert!(message.contains("networking.podSubnet"));
        assert!(message.contains("networking.apiServerPort"));
    }

    #[test]
    fn test_validate_rejects_missing_control_plane() {
        let cluster = Cluster {
            nodes: vec![Node::worker()],
            ..Cluster::default()
        };
        let err = validate(&cluster).unwrap_err();
        assert!(err.to_string().contains("control-plane"));
    }

    #[test]
    fn test_is_cidr() {
        assert!(is_cidr("10.0.0.0/8"));
        assert!(is_cidr("fd00::/64"));
        assert!(!is_cidr("10.0.0.0/33"));
        assert!(!is_cidr("not-a-cidr"));
    }

    #[test]
    fn test_parse_yaml_roles() {
        let yaml = r#"
kind: Cluster
apiVersion: kind.x-k8s.io/v1alpha4
name: dev
nodes:
  - role: control-plane
  - role: worker
    image: kindest/node:v1.31.0
networking:
  disableDefaultCNI: true
"#;
        let cluster: Cluster = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cluster.cluster_name(), Some("dev"));
        assert_eq!(cluster.nodes[1].role, NodeRole::Worker);
        assert_eq!(cluster.control_plane_count(), 1);
        assert!(cluster.networking.disable_default_cni);
    }
}
