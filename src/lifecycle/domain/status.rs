//! Status values reported by remote lifecycle calls.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status string reported by a backend plugin for a lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteStatus(String);

impl RemoteStatus {
    /// Wraps a backend-reported status string.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    /// Returns the status as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a confirmed-successful remote instantiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstantiateOutcome {
    /// Identifier of the workload the backend created (e.g. a release name
    /// or stack id).
    pub workload_id: String,
    /// Status reported by the backend.
    pub status: RemoteStatus,
}

impl InstantiateOutcome {
    /// Creates an instantiation outcome.
    #[must_use]
    pub fn new(workload_id: impl Into<String>, status: RemoteStatus) -> Self {
        Self {
            workload_id: workload_id.into(),
            status,
        }
    }
}
