//! Deadline-bounded wrapper around a raw plugin client.

use crate::instance::domain::AppInstanceId;
use crate::lifecycle::domain::{Credential, InstantiateOutcome, RemoteStatus};
use crate::lifecycle::ports::{ClientError, ClientResult, LifecycleClient};
use crate::registry::domain::HostAddress;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Result type for bounded adapter calls.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Errors returned by deadline-bounded adapter calls.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdapterError {
    /// The remote call did not complete within the deadline.
    #[error("remote {operation} timed out after {deadline:?}")]
    Timeout {
        /// The lifecycle operation that timed out.
        operation: &'static str,
        /// The deadline that was exceeded.
        deadline: Duration,
    },

    /// The remote call completed with a failure.
    #[error("remote {operation} failed: {status}")]
    Remote {
        /// The lifecycle operation that failed.
        operation: &'static str,
        /// The reported failure status.
        status: String,
    },
}

/// Lifecycle adapter invoking one backend plugin under a fixed deadline.
///
/// Every operation runs under the same deadline; on expiry or transport
/// failure the adapter returns a generic failure and never retries. Retry
/// policy belongs to the caller.
#[derive(Clone)]
pub struct PluginAdapter {
    client: Arc<dyn LifecycleClient>,
    deadline: Duration,
}

impl PluginAdapter {
    /// Creates an adapter over a raw plugin client.
    #[must_use]
    pub const fn new(client: Arc<dyn LifecycleClient>, deadline: Duration) -> Self {
        Self { client, deadline }
    }

    /// Deploys an application artifact onto a host.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Timeout`] on deadline expiry or
    /// [`AdapterError::Remote`] when the backend fails the call.
    pub async fn instantiate(
        &self,
        artifact: &str,
        host: HostAddress,
        credential: &Credential,
        instance_id: AppInstanceId,
    ) -> AdapterResult<InstantiateOutcome> {
        info!(%host, instance = %instance_id, "instantiation started");
        let outcome = self
            .bounded(
                "instantiate",
                self.client.instantiate(artifact, host, credential, instance_id),
            )
            .await?;
        info!(status = %outcome.status, "instantiation completed");
        Ok(outcome)
    }

    /// Tears down the workload of a deployed instance.
    ///
    /// A workload that is already absent remotely is treated as
    /// success-equivalent so that re-invoking terminate after a mid-cascade
    /// failure converges instead of wedging.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Timeout`] on deadline expiry or
    /// [`AdapterError::Remote`] when the backend fails the call.
    pub async fn terminate(
        &self,
        host: HostAddress,
        credential: &Credential,
        instance_id: AppInstanceId,
    ) -> AdapterResult<RemoteStatus> {
        info!(%host, instance = %instance_id, "termination started");
        let call = self.client.terminate(host, credential, instance_id);
        match tokio::time::timeout(self.deadline, call).await {
            Err(_) => {
                warn!(instance = %instance_id, "termination timed out");
                Err(AdapterError::Timeout {
                    operation: "terminate",
                    deadline: self.deadline,
                })
            }
            Ok(Ok(status)) => {
                info!(%status, "termination completed");
                Ok(status)
            }
            Ok(Err(ClientError::WorkloadMissing)) => {
                info!(instance = %instance_id, "workload already absent, terminate treated as complete");
                Ok(RemoteStatus::new("Terminated"))
            }
            Ok(Err(err)) => Err(remote_failure("terminate", &err)),
        }
    }

    /// Queries workload status on a host.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Timeout`] on deadline expiry or
    /// [`AdapterError::Remote`] when the backend fails the call.
    pub async fn query(&self, host: HostAddress) -> AdapterResult<RemoteStatus> {
        self.bounded("query", self.client.query(host)).await
    }

    /// Uploads backend configuration material to a host.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Timeout`] on deadline expiry or
    /// [`AdapterError::Remote`] when the backend fails the call.
    pub async fn upload_config(
        &self,
        content: &[u8],
        host: HostAddress,
        credential: &Credential,
    ) -> AdapterResult<RemoteStatus> {
        self.bounded(
            "upload config",
            self.client.upload_config(content, host, credential),
        )
        .await
    }

    /// Removes previously uploaded backend configuration from a host.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Timeout`] on deadline expiry or
    /// [`AdapterError::Remote`] when the backend fails the call.
    pub async fn remove_config(
        &self,
        host: HostAddress,
        credential: &Credential,
    ) -> AdapterResult<RemoteStatus> {
        self.bounded("remove config", self.client.remove_config(host, credential))
            .await
    }

    /// Creates an image from a running VM workload.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Timeout`] on deadline expiry or
    /// [`AdapterError::Remote`] when the backend fails the call.
    pub async fn create_image(
        &self,
        host: HostAddress,
        credential: &Credential,
        instance_id: AppInstanceId,
        vm_id: &str,
    ) -> AdapterResult<String> {
        self.bounded(
            "create image",
            self.client.create_image(host, credential, instance_id, vm_id),
        )
        .await
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> AdapterResult<T>
    where
        F: Future<Output = ClientResult<T>> + Send,
    {
        match tokio::time::timeout(self.deadline, call).await {
            Err(_) => {
                warn!(operation, deadline = ?self.deadline, "remote call timed out");
                Err(AdapterError::Timeout {
                    operation,
                    deadline: self.deadline,
                })
            }
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(remote_failure(operation, &err)),
        }
    }
}

fn remote_failure(operation: &'static str, err: &ClientError) -> AdapterError {
    warn!(operation, error = %err, "remote call failed");
    AdapterError::Remote {
        operation,
        status: err.to_string(),
    }
}
