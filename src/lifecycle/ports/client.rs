//! Remote plugin client contract.

use crate::instance::domain::AppInstanceId;
use crate::lifecycle::domain::{Credential, InstantiateOutcome, RemoteStatus};
use crate::registry::domain::HostAddress;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for raw plugin calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors returned by raw plugin clients.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The backend processed the request and rejected it.
    #[error("backend rejected the request: {0}")]
    Rejected(String),

    /// The remote workload the operation targets does not exist.
    #[error("remote workload not present")]
    WorkloadMissing,

    /// The plugin could not be reached or the call broke mid-flight.
    #[error("transport failure: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl ClientError {
    /// Wraps a transport-level error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}

/// Raw remote client for one backend technology.
///
/// Implementations are stateless: no local persistence, no caching, no
/// internal retries, and no side effects beyond the remote call. Deadlines
/// are applied by the caller, not here.
#[async_trait]
pub trait LifecycleClient: Send + Sync {
    /// Deploys an application artifact onto a host.
    async fn instantiate(
        &self,
        artifact: &str,
        host: HostAddress,
        credential: &Credential,
        instance_id: AppInstanceId,
    ) -> ClientResult<InstantiateOutcome>;

    /// Tears down the workload of a deployed instance.
    async fn terminate(
        &self,
        host: HostAddress,
        credential: &Credential,
        instance_id: AppInstanceId,
    ) -> ClientResult<RemoteStatus>;

    /// Queries workload status on a host.
    async fn query(&self, host: HostAddress) -> ClientResult<RemoteStatus>;

    /// Uploads backend configuration material to a host.
    async fn upload_config(
        &self,
        content: &[u8],
        host: HostAddress,
        credential: &Credential,
    ) -> ClientResult<RemoteStatus>;

    /// Removes previously uploaded backend configuration from a host.
    async fn remove_config(
        &self,
        host: HostAddress,
        credential: &Credential,
    ) -> ClientResult<RemoteStatus>;

    /// Creates an image from a running VM workload and returns the raw
    /// response body.
    async fn create_image(
        &self,
        host: HostAddress,
        credential: &Credential,
        instance_id: AppInstanceId,
        vm_id: &str,
    ) -> ClientResult<String>;
}
