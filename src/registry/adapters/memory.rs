//! In-memory host repository for tests and embedded use.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::registry::{
    domain::{Host, HostAddress},
    ports::{HostRegistryError, HostRegistryResult, HostRepository},
};

/// Thread-safe in-memory host repository.
///
/// The admission check and the capability replacement run under a single
/// write lock, so the check-then-insert sequence is atomic here.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHostRegistry {
    state: Arc<RwLock<BTreeMap<HostAddress, Host>>>,
}

impl InMemoryHostRegistry {
    /// Creates an empty in-memory host registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl ToString) -> HostRegistryError {
    HostRegistryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl HostRepository for InMemoryHostRegistry {
    async fn upsert_capped(&self, host: &Host, capacity: usize) -> HostRegistryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;

        if !state.contains_key(&host.address()) && state.len() >= capacity {
            return Err(HostRegistryError::AdmissionRejected { capacity });
        }

        state.insert(host.address(), host.clone());
        Ok(())
    }

    async fn find(&self, address: HostAddress) -> HostRegistryResult<Option<Host>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.get(&address).cloned())
    }

    async fn list(&self) -> HostRegistryResult<Vec<Host>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.values().cloned().collect())
    }

    async fn delete(&self, address: HostAddress) -> HostRegistryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state
            .remove(&address)
            .map(|_| ())
            .ok_or(HostRegistryError::NotFound(address))
    }

    async fn count(&self) -> HostRegistryResult<usize> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.len())
    }

    async fn mark_synced(&self, addresses: &[HostAddress]) -> HostRegistryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        for address in addresses {
            if let Some(host) = state.get_mut(address) {
                host.mark_synced();
            }
        }
        Ok(())
    }
}
