//! Edge host aggregate root.

use super::{Capability, HostAddress, HostDomainError, HostName};
use crate::lifecycle::domain::BackendKind;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Maximum length for the street address field.
const MAX_STREET_ADDRESS_LENGTH: usize = 256;

/// Maximum length for the coordinates field.
const MAX_COORDINATES_LENGTH: usize = 128;

/// Registered edge node capable of running workloads.
///
/// The host owns its [`Capability`] children exclusively; they are created
/// and deleted alongside host mutation. A freshly created or updated host is
/// always pending upstream sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    address: HostAddress,
    name: HostName,
    zip_code: String,
    city: String,
    street_address: String,
    affinity: String,
    owner: String,
    coordinates: String,
    vim: BackendKind,
    origin: String,
    sync_status: bool,
    capabilities: Vec<Capability>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for constructing a new host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHostData {
    /// Registry identity of the host.
    pub address: HostAddress,
    /// Display name.
    pub name: HostName,
    /// Postal code of the host location.
    pub zip_code: String,
    /// City of the host location.
    pub city: String,
    /// Street address of the host location.
    pub street_address: String,
    /// Workload affinity tag.
    pub affinity: String,
    /// Owning user name.
    pub owner: String,
    /// Geographic coordinates.
    pub coordinates: String,
    /// Backend selector governing the host's workloads.
    pub vim: BackendKind,
    /// Origin of the registration request.
    pub origin: String,
    /// Hardware capabilities advertised by the host.
    pub capabilities: Vec<Capability>,
}

/// Parameter object for reconstructing a persisted host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedHostData {
    /// Persisted registry identity.
    pub address: HostAddress,
    /// Persisted display name.
    pub name: HostName,
    /// Persisted postal code.
    pub zip_code: String,
    /// Persisted city.
    pub city: String,
    /// Persisted street address.
    pub street_address: String,
    /// Persisted affinity tag.
    pub affinity: String,
    /// Persisted owning user name.
    pub owner: String,
    /// Persisted coordinates.
    pub coordinates: String,
    /// Persisted backend selector.
    pub vim: BackendKind,
    /// Persisted request origin.
    pub origin: String,
    /// Persisted sync flag.
    pub sync_status: bool,
    /// Persisted capability children.
    pub capabilities: Vec<Capability>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Host {
    /// Creates a new host pending upstream sync.
    ///
    /// # Errors
    ///
    /// Returns [`HostDomainError::FieldTooLong`] when the street address
    /// exceeds 256 characters or the coordinates exceed 128 characters.
    pub fn new(data: NewHostData, clock: &impl Clock) -> Result<Self, HostDomainError> {
        if data.street_address.len() > MAX_STREET_ADDRESS_LENGTH {
            return Err(HostDomainError::FieldTooLong {
                field: "street address",
                limit: MAX_STREET_ADDRESS_LENGTH,
            });
        }
        if data.coordinates.len() > MAX_COORDINATES_LENGTH {
            return Err(HostDomainError::FieldTooLong {
                field: "coordinates",
                limit: MAX_COORDINATES_LENGTH,
            });
        }

        let timestamp = clock.utc();
        Ok(Self {
            address: data.address,
            name: data.name,
            zip_code: data.zip_code,
            city: data.city,
            street_address: data.street_address,
            affinity: data.affinity,
            owner: data.owner,
            coordinates: data.coordinates,
            vim: data.vim,
            origin: data.origin,
            sync_status: false,
            capabilities: data.capabilities,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a host from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedHostData) -> Self {
        Self {
            address: data.address,
            name: data.name,
            zip_code: data.zip_code,
            city: data.city,
            street_address: data.street_address,
            affinity: data.affinity,
            owner: data.owner,
            coordinates: data.coordinates,
            vim: data.vim,
            origin: data.origin,
            sync_status: data.sync_status,
            capabilities: data.capabilities,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the registry identity of the host.
    #[must_use]
    pub const fn address(&self) -> HostAddress {
        self.address
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &HostName {
        &self.name
    }

    /// Returns the postal code of the host location.
    #[must_use]
    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    /// Returns the city of the host location.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the street address of the host location.
    #[must_use]
    pub fn street_address(&self) -> &str {
        &self.street_address
    }

    /// Returns the workload affinity tag.
    #[must_use]
    pub fn affinity(&self) -> &str {
        &self.affinity
    }

    /// Returns the owning user name.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the geographic coordinates.
    #[must_use]
    pub fn coordinates(&self) -> &str {
        &self.coordinates
    }

    /// Returns the backend selector governing the host's workloads.
    #[must_use]
    pub const fn vim(&self) -> BackendKind {
        self.vim
    }

    /// Returns the origin of the registration request.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns whether the host's current state has been delivered upstream.
    #[must_use]
    pub const fn is_synced(&self) -> bool {
        self.sync_status
    }

    /// Returns the capability children, in stable order.
    #[must_use]
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Marks the host and its capabilities as delivered upstream.
    pub fn mark_synced(&mut self) {
        self.sync_status = true;
        for capability in &mut self.capabilities {
            capability.mark_synced();
        }
    }
}
