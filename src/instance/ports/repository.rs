//! Repository port for application instance persistence.

use crate::instance::domain::{AppInstanceId, InstanceRecord, TenantId};
use crate::registry::domain::HostAddress;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for instance registry operations.
pub type InstanceRegistryResult<T> = Result<T, InstanceRegistryError>;

/// Application instance persistence contract.
///
/// Tenant bookkeeping rows are owned by the same registry: a tenant record
/// exists while the tenant has at least one instance.
#[async_trait]
pub trait InstanceRepository: Send + Sync {
    /// Stores a new instance record.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceRegistryError::Duplicate`] when the instance id is
    /// already registered.
    async fn insert(&self, record: &InstanceRecord) -> InstanceRegistryResult<()>;

    /// Finds an instance record by id.
    ///
    /// Returns `None` when the instance is not registered.
    async fn find(&self, id: AppInstanceId) -> InstanceRegistryResult<Option<InstanceRecord>>;

    /// Deletes an instance record.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceRegistryError::NotFound`] when the instance is not
    /// registered.
    async fn delete(&self, id: AppInstanceId) -> InstanceRegistryResult<()>;

    /// Returns all instance records.
    async fn list(&self) -> InstanceRegistryResult<Vec<InstanceRecord>>;

    /// Returns the instance records owned by the given host.
    async fn list_by_host(
        &self,
        address: HostAddress,
    ) -> InstanceRegistryResult<Vec<InstanceRecord>>;

    /// Records tenant bookkeeping for the given tenant (idempotent).
    async fn record_tenant(&self, tenant: &TenantId) -> InstanceRegistryResult<()>;

    /// Removes tenant bookkeeping for the given tenant (idempotent).
    async fn delete_tenant(&self, tenant: &TenantId) -> InstanceRegistryResult<()>;

    /// Returns the number of instances owned by the given tenant.
    async fn tenant_instance_count(&self, tenant: &TenantId) -> InstanceRegistryResult<usize>;
}

/// Errors returned by instance repository implementations.
#[derive(Debug, Clone, Error)]
pub enum InstanceRegistryError {
    /// An instance with the same identifier already exists.
    #[error("duplicate app instance: {0}")]
    Duplicate(AppInstanceId),

    /// The instance was not found.
    #[error("app instance not found: {0}")]
    NotFound(AppInstanceId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl InstanceRegistryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
