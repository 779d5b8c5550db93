//! Sync protocol tests: at-least-once delivery and flag handling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::LcmError;
use crate::registry::{
    adapters::memory::InMemoryHostRegistry,
    domain::{Host, HostAddress},
    ports::{DeliveryError, HostRegistryError, HostRegistryResult, HostRepository, SyncDelivery},
    services::{HostRegistryService, HostSyncService, RegisterHostRequest},
};
use crate::config::LcmConfig;
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

/// Delivery sink recording every batch it receives, with a switchable
/// failure mode.
#[derive(Default)]
struct RecordingDelivery {
    batches: Mutex<Vec<Vec<HostAddress>>>,
    failing: AtomicBool,
}

impl RecordingDelivery {
    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn batches(&self) -> Vec<Vec<HostAddress>> {
        self.batches.lock().expect("recorder lock").clone()
    }
}

#[async_trait]
impl SyncDelivery for RecordingDelivery {
    async fn deliver(&self, hosts: &[Host]) -> Result<(), DeliveryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DeliveryError("upstream unreachable".to_owned()));
        }
        let addresses = hosts.iter().map(Host::address).collect();
        self.batches.lock().expect("recorder lock").push(addresses);
        Ok(())
    }
}

struct SyncWorld {
    registration: HostRegistryService<InMemoryHostRegistry, DefaultClock>,
    sync: HostSyncService<InMemoryHostRegistry, RecordingDelivery>,
    delivery: Arc<RecordingDelivery>,
}

#[fixture]
fn world() -> SyncWorld {
    let repository = Arc::new(InMemoryHostRegistry::new());
    let delivery = Arc::new(RecordingDelivery::default());
    SyncWorld {
        registration: HostRegistryService::new(
            Arc::clone(&repository),
            Arc::new(DefaultClock),
            &LcmConfig::new(),
        ),
        sync: HostSyncService::new(repository, Arc::clone(&delivery)),
        delivery,
    }
}

async fn register(world: &SyncWorld, address: &str) -> HostAddress {
    world
        .registration
        .register(RegisterHostRequest::new(address, "edge-node", "k8s", "ops"))
        .await
        .expect("registration should succeed");
    HostAddress::parse(address).expect("valid address")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sync_delivers_pending_hosts_and_flips_flags(world: SyncWorld) {
    let first = register(&world, "10.0.0.1").await;
    let second = register(&world, "10.0.0.2").await;

    let delivered = world.sync.sync_updated().await.expect("sync should succeed");

    assert_eq!(delivered, 2);
    assert_eq!(world.delivery.batches(), vec![vec![first, second]]);
    let hosts = world
        .registration
        .list()
        .await
        .expect("listing should succeed");
    assert!(hosts.iter().all(Host::is_synced));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_cycle_delivers_nothing_when_all_synced(world: SyncWorld) {
    register(&world, "10.0.0.1").await;

    world.sync.sync_updated().await.expect("first cycle");
    let delivered = world.sync.sync_updated().await.expect("second cycle");

    assert_eq!(delivered, 0);
    assert_eq!(world.delivery.batches().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sync_selects_only_hosts_pending_delivery(world: SyncWorld) {
    register(&world, "10.0.0.1").await;
    world.sync.sync_updated().await.expect("first cycle");

    let late = register(&world, "10.0.0.2").await;
    let delivered = world.sync.sync_updated().await.expect("second cycle");

    assert_eq!(delivered, 1);
    assert_eq!(world.delivery.batches().last(), Some(&vec![late]));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_delivery_leaves_hosts_pending_for_redelivery(world: SyncWorld) {
    let address = register(&world, "10.0.0.1").await;
    world.delivery.set_failing(true);

    let result = world.sync.sync_updated().await;

    assert!(matches!(
        result,
        Err(LcmError::RemoteFailure {
            operation: "sync",
            ..
        })
    ));
    let host = world
        .registration
        .find(address)
        .await
        .expect("lookup should succeed")
        .expect("host should be present");
    assert!(!host.is_synced());

    world.delivery.set_failing(false);
    let delivered = world.sync.sync_updated().await.expect("retry cycle");
    assert_eq!(delivered, 1);
    assert_eq!(world.delivery.batches(), vec![vec![address]]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_registry_syncs_nothing(world: SyncWorld) {
    let delivered = world.sync.sync_updated().await.expect("sync should succeed");

    assert_eq!(delivered, 0);
    assert!(world.delivery.batches().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reregistration_after_sync_requeues_the_host(world: SyncWorld) {
    let address = register(&world, "10.0.0.1").await;
    world.sync.sync_updated().await.expect("first cycle");

    register(&world, "10.0.0.1").await;
    let delivered = world.sync.sync_updated().await.expect("second cycle");

    assert_eq!(delivered, 1);
    assert_eq!(world.delivery.batches().len(), 2);
    assert_eq!(world.delivery.batches().last(), Some(&vec![address]));
}

/// Repository wrapper whose sync-flag flip can be made to fail after a
/// successful delivery.
struct FlipFailingRegistry {
    inner: InMemoryHostRegistry,
    failing: AtomicBool,
}

#[async_trait]
impl HostRepository for FlipFailingRegistry {
    async fn upsert_capped(&self, host: &Host, capacity: usize) -> HostRegistryResult<()> {
        self.inner.upsert_capped(host, capacity).await
    }

    async fn find(&self, address: HostAddress) -> HostRegistryResult<Option<Host>> {
        self.inner.find(address).await
    }

    async fn list(&self) -> HostRegistryResult<Vec<Host>> {
        self.inner.list().await
    }

    async fn delete(&self, address: HostAddress) -> HostRegistryResult<()> {
        self.inner.delete(address).await
    }

    async fn count(&self) -> HostRegistryResult<usize> {
        self.inner.count().await
    }

    async fn mark_synced(&self, addresses: &[HostAddress]) -> HostRegistryResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(HostRegistryError::persistence(std::io::Error::other(
                "flag flip failed",
            )));
        }
        self.inner.mark_synced(addresses).await
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_flag_flip_redelivers_on_the_next_cycle() {
    let repository = Arc::new(FlipFailingRegistry {
        inner: InMemoryHostRegistry::new(),
        failing: AtomicBool::new(true),
    });
    let delivery = Arc::new(RecordingDelivery::default());
    let registration = HostRegistryService::new(
        Arc::clone(&repository),
        Arc::new(DefaultClock),
        &LcmConfig::new(),
    );
    let sync = HostSyncService::new(Arc::clone(&repository), Arc::clone(&delivery));

    registration
        .register(RegisterHostRequest::new("10.0.0.1", "edge-node", "k8s", "ops"))
        .await
        .expect("registration should succeed");
    let address = HostAddress::parse("10.0.0.1").expect("valid address");

    let result = sync.sync_updated().await;

    assert!(matches!(result, Err(LcmError::Persistence(_))));
    // The batch was handed over before the flip failed; the flag must stay
    // unsynced so the next cycle redelivers (at-least-once).
    assert_eq!(delivery.batches(), vec![vec![address]]);
    let host = repository
        .find(address)
        .await
        .expect("lookup should succeed")
        .expect("host should be present");
    assert!(!host.is_synced());

    repository.failing.store(false, Ordering::SeqCst);
    let delivered = sync.sync_updated().await.expect("retry cycle");

    assert_eq!(delivered, 1);
    assert_eq!(delivery.batches().len(), 2);
    assert_eq!(delivery.batches().last(), Some(&vec![address]));
}
