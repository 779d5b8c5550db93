//! Shared fixtures for lifecycle tests: a mock plugin client and seeding
//! helpers for hosts and instance records.

use std::sync::Arc;

use crate::instance::{
    adapters::memory::{InMemoryAuthConfigStore, InMemoryInstanceRegistry},
    domain::{AppAuthConfig, AppInstanceId, InstanceRecord, TenantId},
    ports::{AuthConfigStore, InstanceRepository},
};
use crate::lifecycle::domain::{BackendKind, Credential, InstantiateOutcome, RemoteStatus};
use crate::lifecycle::ports::{ClientResult, LifecycleClient};
use crate::registry::{
    adapters::memory::InMemoryHostRegistry,
    domain::{Host, HostAddress, HostName, NewHostData},
    ports::HostRepository,
};
use async_trait::async_trait;
use mockable::DefaultClock;
use mockall::mock;

mock! {
    pub Client {}

    #[async_trait]
    impl LifecycleClient for Client {
        async fn instantiate(
            &self,
            artifact: &str,
            host: HostAddress,
            credential: &Credential,
            instance_id: AppInstanceId,
        ) -> ClientResult<InstantiateOutcome>;

        async fn terminate(
            &self,
            host: HostAddress,
            credential: &Credential,
            instance_id: AppInstanceId,
        ) -> ClientResult<RemoteStatus>;

        async fn query(&self, host: HostAddress) -> ClientResult<RemoteStatus>;

        async fn upload_config(
            &self,
            content: &[u8],
            host: HostAddress,
            credential: &Credential,
        ) -> ClientResult<RemoteStatus>;

        async fn remove_config(
            &self,
            host: HostAddress,
            credential: &Credential,
        ) -> ClientResult<RemoteStatus>;

        async fn create_image(
            &self,
            host: HostAddress,
            credential: &Credential,
            instance_id: AppInstanceId,
            vm_id: &str,
        ) -> ClientResult<String>;
    }
}

/// Client whose every call stalls long enough to trip a short deadline.
pub struct StalledClient {
    delay: std::time::Duration,
}

impl StalledClient {
    pub const fn new(delay: std::time::Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl LifecycleClient for StalledClient {
    async fn instantiate(
        &self,
        _artifact: &str,
        _host: HostAddress,
        _credential: &Credential,
        _instance_id: AppInstanceId,
    ) -> ClientResult<InstantiateOutcome> {
        tokio::time::sleep(self.delay).await;
        Ok(InstantiateOutcome::new("late", RemoteStatus::new("Created")))
    }

    async fn terminate(
        &self,
        _host: HostAddress,
        _credential: &Credential,
        _instance_id: AppInstanceId,
    ) -> ClientResult<RemoteStatus> {
        tokio::time::sleep(self.delay).await;
        Ok(RemoteStatus::new("Terminated"))
    }

    async fn query(&self, _host: HostAddress) -> ClientResult<RemoteStatus> {
        tokio::time::sleep(self.delay).await;
        Ok(RemoteStatus::new("Running"))
    }

    async fn upload_config(
        &self,
        _content: &[u8],
        _host: HostAddress,
        _credential: &Credential,
    ) -> ClientResult<RemoteStatus> {
        tokio::time::sleep(self.delay).await;
        Ok(RemoteStatus::new("Uploaded"))
    }

    async fn remove_config(
        &self,
        _host: HostAddress,
        _credential: &Credential,
    ) -> ClientResult<RemoteStatus> {
        tokio::time::sleep(self.delay).await;
        Ok(RemoteStatus::new("Removed"))
    }

    async fn create_image(
        &self,
        _host: HostAddress,
        _credential: &Credential,
        _instance_id: AppInstanceId,
        _vm_id: &str,
    ) -> ClientResult<String> {
        tokio::time::sleep(self.delay).await;
        Ok("image".to_owned())
    }
}

/// In-memory stores shared by an orchestrator under test.
#[derive(Default)]
pub struct Stores {
    pub hosts: Arc<InMemoryHostRegistry>,
    pub instances: Arc<InMemoryInstanceRegistry>,
    pub auth_configs: Arc<InMemoryAuthConfigStore>,
}

impl Stores {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Registers a host directly in the repository and returns its address.
pub async fn seed_host(
    hosts: &InMemoryHostRegistry,
    address: &str,
    vim: BackendKind,
) -> HostAddress {
    let parsed = HostAddress::parse(address).expect("valid address");
    let host = Host::new(
        NewHostData {
            address: parsed,
            name: HostName::new("edge-node").expect("valid name"),
            zip_code: String::new(),
            city: String::new(),
            street_address: String::new(),
            affinity: String::new(),
            owner: "ops".to_owned(),
            coordinates: String::new(),
            vim,
            origin: String::new(),
            capabilities: Vec::new(),
        },
        &DefaultClock,
    )
    .expect("valid host");
    hosts.upsert_capped(&host, 50).await.expect("host seeded");
    parsed
}

/// Inserts an instance record with auth config and tenant bookkeeping, as a
/// completed instantiation would have left them.
pub async fn seed_record(
    stores: &Stores,
    id: AppInstanceId,
    host_address: HostAddress,
    tenant: &TenantId,
) -> InstanceRecord {
    let record = InstanceRecord::new(
        id,
        host_address,
        tenant.clone(),
        "pkg-1",
        BackendKind::Kubernetes,
        "release-1",
        &DefaultClock,
    );
    stores.instances.insert(&record).await.expect("record seeded");
    stores
        .instances
        .record_tenant(tenant)
        .await
        .expect("tenant seeded");
    stores
        .auth_configs
        .store(id, AppAuthConfig::generate())
        .await
        .expect("auth config seeded");
    record
}

/// Returns a validated tenant id for tests.
pub fn tenant(value: &str) -> TenantId {
    TenantId::new(value).expect("valid tenant id")
}
