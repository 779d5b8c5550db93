//! Domain tests for backend tags, credentials, and status values.

use crate::lifecycle::domain::{BackendKind, Credential, RemoteStatus, UnknownBackendError};
use rstest::rstest;

#[rstest]
#[case("k8s", BackendKind::Kubernetes)]
#[case("kubernetes", BackendKind::Kubernetes)]
#[case("helm", BackendKind::Kubernetes)]
#[case("K8S", BackendKind::Kubernetes)]
#[case("openstack", BackendKind::OpenStack)]
#[case("OS", BackendKind::OpenStack)]
#[case(" OpenStack ", BackendKind::OpenStack)]
fn backend_tag_resolves_case_insensitively(#[case] tag: &str, #[case] expected: BackendKind) {
    assert_eq!(BackendKind::from_tag(tag), Ok(expected));
}

#[rstest]
#[case("vmware")]
#[case("")]
#[case("k8")]
fn unknown_backend_tag_fails_explicitly(#[case] tag: &str) {
    assert_eq!(
        BackendKind::from_tag(tag),
        Err(UnknownBackendError(tag.to_owned()))
    );
}

#[rstest]
fn canonical_tags_round_trip() {
    assert_eq!(
        BackendKind::from_tag(BackendKind::Kubernetes.as_tag()),
        Ok(BackendKind::Kubernetes)
    );
    assert_eq!(
        BackendKind::from_tag(BackendKind::OpenStack.as_tag()),
        Ok(BackendKind::OpenStack)
    );
}

#[rstest]
fn credential_debug_output_is_redacted() {
    let credential = Credential::new("secret-token");

    let rendered = format!("{credential:?}");

    assert!(!rendered.contains("secret-token"));
    assert!(rendered.contains("<redacted>"));
}

#[rstest]
fn remote_status_displays_raw_value() {
    let status = RemoteStatus::new("Terminated");
    assert_eq!(status.to_string(), "Terminated");
    assert_eq!(status.as_str(), "Terminated");
}
