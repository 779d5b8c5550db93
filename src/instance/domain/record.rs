//! Application instance record and auxiliary auth-config material.

use super::{AppInstanceId, TenantId};
use crate::lifecycle::domain::BackendKind;
use crate::registry::domain::HostAddress;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Persisted record of a deployed application instance.
///
/// A record is created only after a confirmed-successful remote
/// instantiation, and deleted only after both the remote teardown and the
/// auth-config teardown succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    id: AppInstanceId,
    host_address: HostAddress,
    tenant: TenantId,
    package_id: String,
    backend: BackendKind,
    workload_id: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted instance record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedInstanceData {
    /// Persisted instance identifier.
    pub id: AppInstanceId,
    /// Persisted host reference.
    pub host_address: HostAddress,
    /// Persisted owning tenant.
    pub tenant: TenantId,
    /// Persisted application package identifier.
    pub package_id: String,
    /// Persisted backend kind.
    pub backend: BackendKind,
    /// Persisted backend workload identifier.
    pub workload_id: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl InstanceRecord {
    /// Creates a record for a confirmed-successful instantiation.
    #[must_use]
    pub fn new(
        id: AppInstanceId,
        host_address: HostAddress,
        tenant: TenantId,
        package_id: impl Into<String>,
        backend: BackendKind,
        workload_id: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id,
            host_address,
            tenant,
            package_id: package_id.into(),
            backend,
            workload_id: workload_id.into(),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedInstanceData) -> Self {
        Self {
            id: data.id,
            host_address: data.host_address,
            tenant: data.tenant,
            package_id: data.package_id,
            backend: data.backend,
            workload_id: data.workload_id,
            created_at: data.created_at,
        }
    }

    /// Returns the instance identifier.
    #[must_use]
    pub const fn id(&self) -> AppInstanceId {
        self.id
    }

    /// Returns the address of the host running the instance.
    #[must_use]
    pub const fn host_address(&self) -> HostAddress {
        self.host_address
    }

    /// Returns the owning tenant.
    #[must_use]
    pub const fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    /// Returns the application package identifier.
    #[must_use]
    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    /// Returns the backend kind the instance was deployed through.
    #[must_use]
    pub const fn backend(&self) -> BackendKind {
        self.backend
    }

    /// Returns the backend workload identifier.
    #[must_use]
    pub fn workload_id(&self) -> &str {
        &self.workload_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Auxiliary per-instance credential material.
///
/// Generated when an instance is created and deleted during its teardown;
/// the secret key is redacted from debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct AppAuthConfig {
    access_key: String,
    secret_key: String,
}

impl AppAuthConfig {
    /// Generates a fresh access/secret key pair.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            access_key: Uuid::new_v4().simple().to_string(),
            secret_key: Uuid::new_v4().simple().to_string(),
        }
    }

    /// Returns the access key.
    #[must_use]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Returns the secret key.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for AppAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppAuthConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
