//! Upstream synchronization of host records.

use crate::error::{LcmError, LcmResult};
use crate::registry::{
    domain::Host,
    ports::{HostRepository, SyncDelivery},
};
use std::sync::Arc;
use tracing::{debug, info};

/// Sync protocol driver for the host registry.
///
/// Each cycle selects the hosts whose state has not been delivered upstream,
/// hands them to the [`SyncDelivery`] sink, and only after a successful
/// handover flips their sync flags. Delivery is at-least-once: a failure in
/// either step leaves the affected hosts unsynced so the next cycle
/// redelivers them. Concurrent cycles are not coordinated and can deliver
/// the same host twice.
#[derive(Clone)]
pub struct HostSyncService<H, D>
where
    H: HostRepository,
    D: SyncDelivery,
{
    hosts: Arc<H>,
    delivery: Arc<D>,
}

impl<H, D> HostSyncService<H, D>
where
    H: HostRepository,
    D: SyncDelivery,
{
    /// Creates a new sync service.
    #[must_use]
    pub const fn new(hosts: Arc<H>, delivery: Arc<D>) -> Self {
        Self { hosts, delivery }
    }

    /// Runs one sync cycle and returns the number of hosts delivered.
    ///
    /// # Errors
    ///
    /// Returns [`LcmError::Persistence`] when the store fails, or
    /// [`LcmError::RemoteFailure`] when the upstream sink refuses delivery;
    /// in both cases no sync flag is flipped.
    pub async fn sync_updated(&self) -> LcmResult<usize> {
        let hosts = self.hosts.list().await?;
        let pending: Vec<Host> = hosts.into_iter().filter(|host| !host.is_synced()).collect();

        if pending.is_empty() {
            debug!("no host records pending sync");
            return Ok(0);
        }

        self.delivery
            .deliver(&pending)
            .await
            .map_err(|err| LcmError::RemoteFailure {
                operation: "sync",
                status: err.0,
            })?;

        let addresses: Vec<_> = pending.iter().map(Host::address).collect();
        self.hosts.mark_synced(&addresses).await?;

        info!(delivered = pending.len(), "host records synchronized");
        Ok(pending.len())
    }
}
