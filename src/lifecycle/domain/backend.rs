//! Closed set of deployment backend kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a backend selector tag matches no known kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown backend selector tag: {0}")]
pub struct UnknownBackendError(pub String);

/// Deployment technology governing a host's workloads.
///
/// The selector field on a host (its VIM) resolves to exactly one of these
/// kinds; every lifecycle operation dispatches exhaustively over them.
/// Unresolvable tags fail explicitly rather than falling through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Container workloads managed through the Kubernetes/Helm plugin.
    Kubernetes,
    /// Virtual-machine workloads managed through the OpenStack plugin.
    OpenStack,
}

impl BackendKind {
    /// Parses a backend selector tag.
    ///
    /// Matching is case-insensitive over the tags the wire protocol uses
    /// (`k8s`, `kubernetes`, `helm` for container backends; `openstack`,
    /// `os` for VM backends).
    ///
    /// # Errors
    ///
    /// Returns [`UnknownBackendError`] for any other tag.
    pub fn from_tag(tag: &str) -> Result<Self, UnknownBackendError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "k8s" | "kubernetes" | "helm" => Ok(Self::Kubernetes),
            "openstack" | "os" => Ok(Self::OpenStack),
            _ => Err(UnknownBackendError(tag.to_owned())),
        }
    }

    /// Returns the canonical persisted tag for this kind.
    #[must_use]
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Kubernetes => "k8s",
            Self::OpenStack => "openstack",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}
