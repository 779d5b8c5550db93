//! Registration and admission tests for the host registry service.

use std::sync::Arc;

use crate::config::LcmConfig;
use crate::error::LcmError;
use crate::registry::{
    adapters::memory::InMemoryHostRegistry,
    domain::HostAddress,
    ports::HostRepository,
    services::{HostRegistryService, RegisterHostRequest},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = HostRegistryService<InMemoryHostRegistry, DefaultClock>;

fn service_with_capacity(repository: Arc<InMemoryHostRegistry>, capacity: usize) -> TestService {
    let config = LcmConfig::new().with_max_host_records(capacity);
    HostRegistryService::new(repository, Arc::new(DefaultClock), &config)
}

#[fixture]
fn repository() -> Arc<InMemoryHostRegistry> {
    Arc::new(InMemoryHostRegistry::new())
}

fn request(address: &str) -> RegisterHostRequest {
    RegisterHostRequest::new(address, "edge-node-1", "k8s", "ops")
        .with_location("10115", "Berlin", "Invalidenstrasse 1")
        .with_coordinates("52.5310,13.3849")
        .with_affinity("gpu")
        .with_origin("mepm")
        .with_capability("GPU", "nvidia", "t4")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_persists_host_pending_sync(repository: Arc<InMemoryHostRegistry>) {
    let service = service_with_capacity(Arc::clone(&repository), 50);

    let registered = service
        .register(request("192.168.1.10"))
        .await
        .expect("registration should succeed");

    let address = HostAddress::parse("192.168.1.10").expect("valid address");
    let fetched = service
        .find(address)
        .await
        .expect("lookup should succeed")
        .expect("host should be present");

    assert_eq!(fetched, registered);
    assert!(!fetched.is_synced());
    assert_eq!(fetched.name().as_str(), "edge-node-1");
    assert_eq!(fetched.city(), "Berlin");
    assert_eq!(fetched.capabilities().len(), 1);
    assert_eq!(fetched.capabilities()[0].hw_type(), "GPU");
    assert!(!fetched.capabilities()[0].is_synced());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reregistration_replaces_host_and_resets_sync_flag(
    repository: Arc<InMemoryHostRegistry>,
) {
    let service = service_with_capacity(Arc::clone(&repository), 50);
    let address = HostAddress::parse("192.168.1.10").expect("valid address");

    service
        .register(request("192.168.1.10"))
        .await
        .expect("initial registration should succeed");
    repository
        .mark_synced(&[address])
        .await
        .expect("mark synced should succeed");

    let updated = RegisterHostRequest::new("192.168.1.10", "edge-node-renamed", "openstack", "ops")
        .with_capability("FPGA", "xilinx", "u250");
    service
        .register(updated)
        .await
        .expect("re-registration should succeed");

    let hosts = service.list().await.expect("listing should succeed");
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].name().as_str(), "edge-node-renamed");
    assert_eq!(hosts[0].capabilities().len(), 1);
    assert_eq!(hosts[0].capabilities()[0].hw_type(), "FPGA");
    assert!(!hosts[0].is_synced());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registration_at_capacity_rejects_new_host(repository: Arc<InMemoryHostRegistry>) {
    let service = service_with_capacity(Arc::clone(&repository), 1);

    service
        .register(request("192.168.1.10"))
        .await
        .expect("first registration should succeed");

    let result = service.register(request("192.168.1.11")).await;

    assert!(matches!(
        result,
        Err(LcmError::AdmissionRejected { capacity: 1 })
    ));
    let hosts = service.list().await.expect("listing should succeed");
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].address().to_string(), "192.168.1.10");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registration_at_capacity_still_updates_existing_host(
    repository: Arc<InMemoryHostRegistry>,
) {
    let service = service_with_capacity(Arc::clone(&repository), 1);

    service
        .register(request("192.168.1.10"))
        .await
        .expect("first registration should succeed");

    let updated = RegisterHostRequest::new("192.168.1.10", "edge-node-renamed", "k8s", "ops");
    service
        .register(updated)
        .await
        .expect("update of an existing host should pass the cap");

    let hosts = service.list().await.expect("listing should succeed");
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].name().as_str(), "edge-node-renamed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registration_rejects_malformed_address(repository: Arc<InMemoryHostRegistry>) {
    let service = service_with_capacity(Arc::clone(&repository), 50);

    let result = service.register(request("not-an-address")).await;

    assert!(matches!(result, Err(LcmError::Validation(_))));
    assert!(
        service
            .list()
            .await
            .expect("listing should succeed")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registration_rejects_unknown_backend_tag(repository: Arc<InMemoryHostRegistry>) {
    let service = service_with_capacity(Arc::clone(&repository), 50);

    let unknown = RegisterHostRequest::new("192.168.1.10", "edge-node-1", "vmware", "ops");
    let result = service.register(unknown).await;

    assert!(matches!(result, Err(LcmError::BackendUnavailable(tag)) if tag == "vmware"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_returns_none_for_unknown_host(repository: Arc<InMemoryHostRegistry>) {
    let service = service_with_capacity(repository, 50);
    let address = HostAddress::parse("10.0.0.99").expect("valid address");

    let found = service.find(address).await.expect("lookup should succeed");

    assert!(found.is_none());
}
