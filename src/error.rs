//! Operation-level error taxonomy.
//!
//! Every service operation classifies its failure into one of the coarse
//! categories below and halts its sequence on the first error. There is no
//! internal retry anywhere in the core; retry is the caller's decision.

use crate::instance::domain::InstanceDomainError;
use crate::instance::ports::{AuthConfigError, InstanceRegistryError};
use crate::lifecycle::adapters::AdapterError;
use crate::lifecycle::domain::UnknownBackendError;
use crate::registry::domain::HostDomainError;
use crate::registry::ports::HostRegistryError;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for service-level lifecycle operations.
pub type LcmResult<T> = Result<T, LcmError>;

/// Coarse failure classification surfaced to the request layer.
///
/// The specific failed step within a multi-step sequence is not separately
/// exposed; callers receive the classification plus a status string.
#[derive(Debug, Clone, Error)]
pub enum LcmError {
    /// A registry lookup missed.
    #[error("not found: {0}")]
    NotFound(String),

    /// The host registry is at its configured capacity.
    #[error("host registry at capacity ({capacity} records)")]
    AdmissionRejected {
        /// The configured registry cap that was hit.
        capacity: usize,
    },

    /// No lifecycle backend is available for the given selector tag.
    #[error("no lifecycle backend for tag '{0}'")]
    BackendUnavailable(String),

    /// A remote plugin call exceeded its deadline.
    #[error("remote {operation} timed out after {deadline:?}")]
    RemoteTimeout {
        /// The lifecycle operation that timed out.
        operation: &'static str,
        /// The deadline that was exceeded.
        deadline: Duration,
    },

    /// The remote backend returned an explicit failure.
    #[error("remote {operation} failed: {status}")]
    RemoteFailure {
        /// The lifecycle operation that failed.
        operation: &'static str,
        /// The status reported by the backend.
        status: String,
    },

    /// A store read or write failed.
    #[error("persistence failure: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),

    /// The request was syntactically malformed.
    #[error("invalid request: {0}")]
    Validation(String),
}

impl LcmError {
    /// Wraps an underlying store error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<HostRegistryError> for LcmError {
    fn from(err: HostRegistryError) -> Self {
        match err {
            HostRegistryError::AdmissionRejected { capacity } => {
                Self::AdmissionRejected { capacity }
            }
            HostRegistryError::NotFound(address) => Self::NotFound(format!("host {address}")),
            other => Self::persistence(other),
        }
    }
}

impl From<InstanceRegistryError> for LcmError {
    fn from(err: InstanceRegistryError) -> Self {
        match err {
            InstanceRegistryError::NotFound(id) => Self::NotFound(format!("app instance {id}")),
            InstanceRegistryError::Duplicate(id) => {
                Self::Validation(format!("app instance {id} already exists"))
            }
            other => Self::persistence(other),
        }
    }
}

impl From<AuthConfigError> for LcmError {
    fn from(err: AuthConfigError) -> Self {
        Self::persistence(err)
    }
}

impl From<AdapterError> for LcmError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::Timeout {
                operation,
                deadline,
            } => Self::RemoteTimeout {
                operation,
                deadline,
            },
            AdapterError::Remote { operation, status } => Self::RemoteFailure { operation, status },
        }
    }
}

impl From<UnknownBackendError> for LcmError {
    fn from(err: UnknownBackendError) -> Self {
        Self::BackendUnavailable(err.0)
    }
}

impl From<HostDomainError> for LcmError {
    fn from(err: HostDomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<InstanceDomainError> for LcmError {
    fn from(err: InstanceDomainError) -> Self {
        Self::Validation(err.to_string())
    }
}
