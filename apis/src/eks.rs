//! EKS cluster document (`eksctl.io/v1alpha5`, kind `ClusterConfig`).

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use errors::SchemaError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{Distribution, DistributionDocument, TypeMeta, schema_errors};

pub const DEFAULT_VERSION: &str = "1.30";
/// Region used when no EKS document exists or the document omits one.
pub const DEFAULT_REGION: &str = "eu-north-1";
pub const DEFAULT_INSTANCE_TYPE: &str = "m5.large";
pub const DEFAULT_DESIRED_CAPACITY: u32 = 2;

static CLUSTER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][-a-zA-Z0-9]*$").expect("cluster name pattern is valid")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterConfig {
    #[serde(flatten)]
    pub type_meta: TypeMeta,

    #[validate(nested)]
    pub metadata: ClusterMeta,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub node_groups: Vec<NodeGroup>
}

impl DistributionDocument for ClusterConfig {
    fn distribution(&self) -> Distribution {
        Distribution::Eks
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
pub struct ClusterMeta {
    #[validate(
        length(max = 100, message = "must be at most 100 characters"),
        regex(
            path = *CLUSTER_NAME,
            message = "must start with a letter and contain only letters, digits and hyphens"
        )
    )]
    pub name: String,

    #[validate(length(min = 1, message = "region is required"))]
    pub region: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeGroup {
    #[validate(length(min = 1, message = "node group name must not be empty"))]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub instance_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_capacity: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>
}

/// Fill the fields eksctl defaults when a cluster is created.
pub fn set_defaults(config: &mut ClusterConfig) {
    if config.metadata.version.is_empty() {
        config.metadata.version = DEFAULT_VERSION.to_string();
    }
    for group in &mut config.node_groups {
        if group.instance_type.is_empty() {
            group.instance_type = DEFAULT_INSTANCE_TYPE.to_string();
        }
        let desired = *group
            .desired_capacity
            .get_or_insert(DEFAULT_DESIRED_CAPACITY);
        group.min_size.get_or_insert(desired);
        group.max_size.get_or_insert(desired);
    }
}

/// eksctl's own validation of a cluster config document.
pub fn validate(config: &ClusterConfig) -> Result<(), SchemaError> {
    let mut findings = match Validate::validate(config) {
        Ok(()) => Vec::new(),
        Err(errors) => schema_errors(&errors)
    };

    let mut seen = HashSet::new();
    for (index, group) in config.node_groups.iter().enumerate() {
        if !group.name.is_empty() && !seen.insert(group.name.as_str()) {
            findings.push(SchemaError::invalid(
                format!("nodeGroups[{index}].name"),
                format!("node group '{}' is defined more than once", group.name),
            ));
        }
        findings.extend(check_capacity(index, group));
    }

    SchemaError::collect(findings)
}

fn check_capacity(index: usize, group: &NodeGroup) -> Option<SchemaError> {
    let desired = group.desired_capacity?;
    let min = group.min_size.unwrap_or(desired);
    let max = group.max_size.unwrap_or(desired);
    if min <= desired && desired <= max {
        return None;
    }
    Some(SchemaError::invalid(
        format!("nodeGroups[{index}]"),
        format!("expected minSize ({min}) <= desiredCapacity ({desired}) <= maxSize ({max})"),
    ))
}
