//! Orchestration services for the host registry.

mod registration;
mod sync;

pub use registration::{CapabilityData, HostRegistryService, RegisterHostRequest};
pub use sync::HostSyncService;
