//! Repository port for host registry persistence.

use crate::registry::domain::{Host, HostAddress};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for host registry operations.
pub type HostRegistryResult<T> = Result<T, HostRegistryError>;

/// Host registry persistence contract.
///
/// The store is assumed to serialize per-row writes; cross-row invariants
/// (the registry cap, sync exactly-once) are best-effort unless an adapter
/// hardens them. The admission check lives behind [`Self::upsert_capped`]
/// as a single seam so an adapter can make it transactional without
/// touching the services above.
#[async_trait]
pub trait HostRepository: Send + Sync {
    /// Inserts or updates a host and replaces its capability children,
    /// admitting a new entry only while the registry holds fewer than
    /// `capacity` hosts.
    ///
    /// # Errors
    ///
    /// Returns [`HostRegistryError::AdmissionRejected`] when a new entry
    /// would exceed the cap, leaving the store unchanged.
    async fn upsert_capped(&self, host: &Host, capacity: usize) -> HostRegistryResult<()>;

    /// Finds a host by address, with its capabilities loaded.
    ///
    /// Returns `None` when the host is not registered.
    async fn find(&self, address: HostAddress) -> HostRegistryResult<Option<Host>>;

    /// Returns all registered hosts with their capabilities loaded, in
    /// stable address order.
    async fn list(&self) -> HostRegistryResult<Vec<Host>>;

    /// Deletes a host and its capability children.
    ///
    /// # Errors
    ///
    /// Returns [`HostRegistryError::NotFound`] when the host is not
    /// registered.
    async fn delete(&self, address: HostAddress) -> HostRegistryResult<()>;

    /// Returns the number of registered hosts.
    async fn count(&self) -> HostRegistryResult<usize>;

    /// Flips the sync flag of the given hosts (and their capabilities) to
    /// delivered. Addresses that are no longer registered are skipped.
    async fn mark_synced(&self, addresses: &[HostAddress]) -> HostRegistryResult<()>;
}

/// Errors returned by host repository implementations.
#[derive(Debug, Clone, Error)]
pub enum HostRegistryError {
    /// The registry already holds the maximum number of entries.
    #[error("host registry at capacity ({capacity} records)")]
    AdmissionRejected {
        /// The cap that was hit.
        capacity: usize,
    },

    /// The host was not found.
    #[error("host not found: {0}")]
    NotFound(HostAddress),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl HostRegistryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
