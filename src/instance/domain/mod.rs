//! Domain types for the application instance registry.

mod ids;
mod record;

pub use ids::{AppInstanceId, InstanceDomainError, TenantId};
pub use record::{AppAuthConfig, InstanceRecord, PersistedInstanceData};
