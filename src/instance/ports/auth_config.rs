//! Store port for auxiliary per-instance auth-config material.

use crate::instance::domain::{AppAuthConfig, AppInstanceId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Error returned by auth-config store implementations.
#[derive(Debug, Clone, Error)]
#[error("auth config store failure: {0}")]
pub struct AuthConfigError(pub Arc<dyn std::error::Error + Send + Sync>);

impl AuthConfigError {
    /// Wraps an underlying store error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}

/// Persistence contract for per-instance auth-config material.
#[async_trait]
pub trait AuthConfigStore: Send + Sync {
    /// Stores the auth config for an instance, replacing any previous one.
    async fn store(
        &self,
        id: AppInstanceId,
        config: AppAuthConfig,
    ) -> Result<(), AuthConfigError>;

    /// Removes the auth config for an instance. Removing an absent entry is
    /// not an error, so teardown can be re-invoked safely.
    async fn remove(&self, id: AppInstanceId) -> Result<(), AuthConfigError>;
}
