use std::fmt;

use errors::SchemaError;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// `apiVersion`/`kind` header carried by every document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeMeta {
    #[serde(rename = "apiVersion", skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String
}

impl TypeMeta {
    pub fn new(api_version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.api_version.is_empty() && self.kind.is_empty()
    }

    /// Fill in whichever half of the header is blank, leaving set values alone.
    pub fn fill_missing(&mut self, api_version: &str, kind: &str) {
        if self.api_version.is_empty() {
            self.api_version = api_version.to_string();
        }
        if self.kind.is_empty() {
            self.kind = kind.to_string();
        }
    }

    pub fn matches(&self, api_version: &str, kind: &str) -> bool {
        self.api_version == api_version && self.kind == kind
    }
}

impl fmt::Display for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api_version, self.kind)
    }
}

/// Minimal object metadata: just the name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectMeta {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String
}

/// Kubernetes distribution families known to ksail.
///
/// Parsing is case-insensitive (`"kind"`, `"Kind"` and `"KIND"` all map to
/// [`Distribution::Kind`]). `Tind` is recognised but not yet supported: it
/// has no entry in [`DISTRIBUTION_DEFAULTS`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Distribution {
    Kind,
    K3d,
    #[serde(rename = "EKS")]
    #[strum(serialize = "EKS")]
    Eks,
    Tind
}

impl Distribution {
    pub fn defaults(self) -> Option<&'static DistributionDefaults> {
        DISTRIBUTION_DEFAULTS
            .iter()
            .copied()
            .find(|defaults| defaults.distribution == self)
    }

    pub fn is_supported(self) -> bool {
        self.defaults().is_some()
    }

    /// All distributions that have a defaults row, in declaration order.
    pub fn supported() -> impl Iterator<Item = Distribution> {
        Self::iter().filter(|distribution| distribution.is_supported())
    }

    /// Comma-separated list of supported names, for user-facing hints.
    pub fn supported_list() -> String {
        Self::supported()
            .map(|distribution| distribution.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Per-family constants: type header, default cluster name and context naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionDefaults {
    pub distribution: Distribution,
    pub api_version: &'static str,
    pub kind: &'static str,
    /// Cluster name used when the document leaves it blank or is absent.
    pub default_name: &'static str,
    /// Context is `<prefix>-<name>`; `None` means the family has no convention.
    pub context_prefix: Option<&'static str>,
    pub config_file: &'static str,
    pub schema_docs: &'static str
}

impl DistributionDefaults {
    pub fn type_meta(&self) -> TypeMeta {
        TypeMeta::new(self.api_version, self.kind)
    }

    pub fn expected_context(&self, name: &str) -> Option<String> {
        self.context_prefix
            .map(|prefix| format!("{prefix}-{name}"))
    }
}

pub static KIND_DEFAULTS: DistributionDefaults = DistributionDefaults {
    distribution: Distribution::Kind,
    api_version: "kind.x-k8s.io/v1alpha4",
    kind: "Cluster",
    default_name: "kind",
    context_prefix: Some("kind"),
    config_file: "kind.yaml",
    schema_docs: "https://kind.sigs.k8s.io/docs/user/configuration/"
};

pub static K3D_DEFAULTS: DistributionDefaults = DistributionDefaults {
    distribution: Distribution::K3d,
    api_version: "k3d.io/v1alpha5",
    kind: "Simple",
    default_name: "k3d-default",
    context_prefix: Some("k3d"),
    config_file: "k3d.yaml",
    schema_docs: "https://k3d.io/stable/usage/configfile/"
};

pub static EKS_DEFAULTS: DistributionDefaults = DistributionDefaults {
    distribution: Distribution::Eks,
    api_version: "eksctl.io/v1alpha5",
    kind: "ClusterConfig",
    default_name: "eks-default",
    context_prefix: None,
    config_file: "eks.yaml",
    schema_docs: "https://eksctl.io/usage/schema/"
};

/// One row per supported family; `Tind` has none.
pub static DISTRIBUTION_DEFAULTS: [&DistributionDefaults; 3] =
    [&KIND_DEFAULTS, &K3D_DEFAULTS, &EKS_DEFAULTS];

/// Context a client tool is expected to use for `name` on `distribution`.
///
/// Returns `None` for families without a naming convention and for
/// unsupported families.
pub fn expected_context(distribution: Distribution, name: &str) -> Option<String> {
    distribution
        .defaults()
        .and_then(|defaults| defaults.expected_context(name))
}

/// A loaded distribution document, viewed without knowing its concrete type.
pub trait DistributionDocument: fmt::Debug + Send + Sync {
    fn distribution(&self) -> Distribution;

    fn type_meta(&self) -> &TypeMeta;

    /// Cluster name as written in the document; `None` when blank.
    fn cluster_name(&self) -> Option<&str>;
}

/// Flatten `validator` findings into schema errors with camelCase field paths.
pub(crate) fn schema_errors(errors: &validator::ValidationErrors) -> Vec<SchemaError> {
    let mut collected = Vec::new();
    collect_schema_errors("", errors, &mut collected);
    collected.sort_by_key(ToString::to_string);
    collected
}

fn collect_schema_errors(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<SchemaError>,
) {
    for (field, kind) in errors.errors() {
        let path = join_path(prefix, &camel_case(&field.to_string()));
        match kind {
            validator::ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let reason = error
                        .message
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| format!("failed {} check", error.code));
                    out.push(SchemaError::invalid(path.clone(), reason));
                }
            }
            validator::ValidationErrorsKind::Struct(nested) => {
                collect_schema_errors(&path, nested, out);
            }
            validator::ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_schema_errors(&format!("{path}[{index}]"), nested, out);
                }
            }
        }
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.push(ch.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}
