//! Delivery port for the host sync protocol.

use crate::registry::domain::Host;
use async_trait::async_trait;
use thiserror::Error;

/// Error returned when an upstream delivery attempt fails.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("sync delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// Upstream sink for host records pending synchronization.
///
/// Delivery is at-least-once: a failed attempt leaves the records unsynced
/// and they are redelivered on the next cycle.
#[async_trait]
pub trait SyncDelivery: Send + Sync {
    /// Delivers the given host records upstream.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] when the records could not be handed over;
    /// the caller must not flip sync flags in that case.
    async fn deliver(&self, hosts: &[Host]) -> Result<(), DeliveryError>;
}
