//! Port contracts for host registry persistence and sync delivery.

mod repository;
mod sync;

pub use repository::{HostRegistryError, HostRegistryResult, HostRepository};
pub use sync::{DeliveryError, SyncDelivery};
