//! # Cluster APIs
//!
//! Typed documents read by the ksail configuration pipeline:
//! - [`ksail::Cluster`]: the top-level orchestration document
//! - [`kind::Cluster`]: Kind (`kind.x-k8s.io/v1alpha4`)
//! - [`k3d::SimpleConfig`]: K3d (`k3d.io/v1alpha5`)
//! - [`eks::ClusterConfig`]: EKS (`eksctl.io/v1alpha5`)
//!
//! Each distribution module also exposes the distribution's own
//! `set_defaults` and `validate` routines. Validators and loaders call them
//! as opaque collaborators and never reach into their rules.

pub mod eks;
pub mod k3d;
pub mod kind;
pub mod ksail;
pub mod types;

pub use types::{
    DISTRIBUTION_DEFAULTS, Distribution, DistributionDefaults, DistributionDocument, EKS_DEFAULTS,
    K3D_DEFAULTS, KIND_DEFAULTS, ObjectMeta, TypeMeta, expected_context,
};
