//! Port contracts for instance registry persistence.

mod auth_config;
mod repository;

pub use auth_config::{AuthConfigError, AuthConfigStore};
pub use repository::{InstanceRegistryError, InstanceRegistryResult, InstanceRepository};
