//! In-memory instance repository and auth-config store.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use crate::instance::{
    domain::{AppAuthConfig, AppInstanceId, InstanceRecord, TenantId},
    ports::{
        AuthConfigError, AuthConfigStore, InstanceRegistryError, InstanceRegistryResult,
        InstanceRepository,
    },
};
use crate::registry::domain::HostAddress;

/// Thread-safe in-memory instance repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInstanceRegistry {
    state: Arc<RwLock<InMemoryInstanceState>>,
}

#[derive(Debug, Default)]
struct InMemoryInstanceState {
    records: HashMap<AppInstanceId, InstanceRecord>,
    tenants: BTreeSet<TenantId>,
}

impl InMemoryInstanceRegistry {
    /// Creates an empty in-memory instance registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether tenant bookkeeping exists for the given tenant.
    #[must_use]
    pub fn has_tenant(&self, tenant: &TenantId) -> bool {
        self.state
            .read()
            .map(|state| state.tenants.contains(tenant))
            .unwrap_or(false)
    }
}

fn lock_poisoned(err: impl ToString) -> InstanceRegistryError {
    InstanceRegistryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl InstanceRepository for InMemoryInstanceRegistry {
    async fn insert(&self, record: &InstanceRecord) -> InstanceRegistryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.records.contains_key(&record.id()) {
            return Err(InstanceRegistryError::Duplicate(record.id()));
        }
        state.records.insert(record.id(), record.clone());
        Ok(())
    }

    async fn find(&self, id: AppInstanceId) -> InstanceRegistryResult<Option<InstanceRecord>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.records.get(&id).cloned())
    }

    async fn delete(&self, id: AppInstanceId) -> InstanceRegistryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(InstanceRegistryError::NotFound(id))
    }

    async fn list(&self) -> InstanceRegistryResult<Vec<InstanceRecord>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut records: Vec<_> = state.records.values().cloned().collect();
        records.sort_by_key(|record| record.id().into_inner());
        Ok(records)
    }

    async fn list_by_host(
        &self,
        address: HostAddress,
    ) -> InstanceRegistryResult<Vec<InstanceRecord>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut records: Vec<_> = state
            .records
            .values()
            .filter(|record| record.host_address() == address)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.id().into_inner());
        Ok(records)
    }

    async fn record_tenant(&self, tenant: &TenantId) -> InstanceRegistryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.tenants.insert(tenant.clone());
        Ok(())
    }

    async fn delete_tenant(&self, tenant: &TenantId) -> InstanceRegistryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.tenants.remove(tenant);
        Ok(())
    }

    async fn tenant_instance_count(&self, tenant: &TenantId) -> InstanceRegistryResult<usize> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .records
            .values()
            .filter(|record| record.tenant() == tenant)
            .count())
    }
}

/// Thread-safe in-memory auth-config store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuthConfigStore {
    state: Arc<RwLock<HashMap<AppInstanceId, AppAuthConfig>>>,
}

impl InMemoryAuthConfigStore {
    /// Creates an empty in-memory auth-config store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether auth config exists for the given instance.
    #[must_use]
    pub fn contains(&self, id: AppInstanceId) -> bool {
        self.state
            .read()
            .map(|state| state.contains_key(&id))
            .unwrap_or(false)
    }
}

#[async_trait]
impl AuthConfigStore for InMemoryAuthConfigStore {
    async fn store(
        &self,
        id: AppInstanceId,
        config: AppAuthConfig,
    ) -> Result<(), AuthConfigError> {
        let mut state = self
            .state
            .write()
            .map_err(|err| AuthConfigError::new(std::io::Error::other(err.to_string())))?;
        state.insert(id, config);
        Ok(())
    }

    async fn remove(&self, id: AppInstanceId) -> Result<(), AuthConfigError> {
        let mut state = self
            .state
            .write()
            .map_err(|err| AuthConfigError::new(std::io::Error::other(err.to_string())))?;
        state.remove(&id);
        Ok(())
    }
}
