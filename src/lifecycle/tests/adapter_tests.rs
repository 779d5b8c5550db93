//! Deadline and failure-classification tests for the plugin adapter.

use std::sync::Arc;
use std::time::Duration;

use super::support::{MockClient, StalledClient};
use crate::instance::domain::AppInstanceId;
use crate::lifecycle::adapters::{AdapterError, PluginAdapter};
use crate::lifecycle::domain::{Credential, RemoteStatus};
use crate::lifecycle::ports::ClientError;
use crate::registry::domain::HostAddress;
use rstest::{fixture, rstest};

#[fixture]
fn host() -> HostAddress {
    HostAddress::parse("10.0.0.1").expect("valid address")
}

#[fixture]
fn credential() -> Credential {
    Credential::new("token")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_deadline_is_reported_as_timeout(host: HostAddress) {
    let client = Arc::new(StalledClient::new(Duration::from_millis(500)));
    let adapter = PluginAdapter::new(client, Duration::from_millis(10));

    let result = adapter.query(host).await;

    assert_eq!(
        result,
        Err(AdapterError::Timeout {
            operation: "query",
            deadline: Duration::from_millis(10),
        })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn terminate_deadline_expiry_is_a_timeout(host: HostAddress, credential: Credential) {
    let client = Arc::new(StalledClient::new(Duration::from_millis(500)));
    let adapter = PluginAdapter::new(client, Duration::from_millis(10));

    let result = adapter.terminate(host, &credential, AppInstanceId::new()).await;

    assert!(matches!(
        result,
        Err(AdapterError::Timeout {
            operation: "terminate",
            ..
        })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn call_within_deadline_passes_through(host: HostAddress) {
    let client = Arc::new(StalledClient::new(Duration::from_millis(1)));
    let adapter = PluginAdapter::new(client, Duration::from_secs(5));

    let status = adapter.query(host).await.expect("query should succeed");

    assert_eq!(status, RemoteStatus::new("Running"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remote_rejection_carries_operation_and_status(host: HostAddress, credential: Credential) {
    let mut client = MockClient::new();
    client
        .expect_upload_config()
        .returning(|_, _, _| Err(ClientError::Rejected("bad config".to_owned())));
    let adapter = PluginAdapter::new(Arc::new(client), Duration::from_secs(5));

    let result = adapter.upload_config(b"payload", host, &credential).await;

    assert!(matches!(
        result,
        Err(AdapterError::Remote {
            operation: "upload config",
            ref status,
        }) if status.contains("bad config")
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn terminate_treats_absent_workload_as_complete(host: HostAddress, credential: Credential) {
    let mut client = MockClient::new();
    client
        .expect_terminate()
        .returning(|_, _, _| Err(ClientError::WorkloadMissing));
    let adapter = PluginAdapter::new(Arc::new(client), Duration::from_secs(5));

    let status = adapter
        .terminate(host, &credential, AppInstanceId::new())
        .await
        .expect("absent workload should be success-equivalent");

    assert_eq!(status, RemoteStatus::new("Terminated"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn terminate_rejection_still_fails(host: HostAddress, credential: Credential) {
    let mut client = MockClient::new();
    client
        .expect_terminate()
        .returning(|_, _, _| Err(ClientError::Rejected("workload busy".to_owned())));
    let adapter = PluginAdapter::new(Arc::new(client), Duration::from_secs(5));

    let result = adapter.terminate(host, &credential, AppInstanceId::new()).await;

    assert!(matches!(
        result,
        Err(AdapterError::Remote {
            operation: "terminate",
            ..
        })
    ));
}
