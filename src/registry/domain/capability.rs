//! Hardware capability value-record owned by a host.

use super::HostDomainError;
use serde::{Deserialize, Serialize};

/// Hardware capability advertised by a host.
///
/// A capability never exists without an owning [`super::Host`]; its identity
/// is the (hardware type, host address) composite and it is created and
/// deleted alongside host mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    hw_type: String,
    vendor: String,
    model: String,
    sync_status: bool,
}

impl Capability {
    /// Creates a capability pending upstream delivery.
    ///
    /// # Errors
    ///
    /// Returns [`HostDomainError::EmptyHardwareType`] when the hardware type
    /// is empty after trimming.
    pub fn new(
        hw_type: impl Into<String>,
        vendor: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, HostDomainError> {
        let hw_type = hw_type.into().trim().to_owned();
        if hw_type.is_empty() {
            return Err(HostDomainError::EmptyHardwareType);
        }
        Ok(Self {
            hw_type,
            vendor: vendor.into(),
            model: model.into(),
            sync_status: false,
        })
    }

    /// Reconstructs a capability from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        hw_type: String,
        vendor: String,
        model: String,
        sync_status: bool,
    ) -> Self {
        Self {
            hw_type,
            vendor,
            model,
            sync_status,
        }
    }

    /// Returns the hardware type (identity within the owning host).
    #[must_use]
    pub fn hw_type(&self) -> &str {
        &self.hw_type
    }

    /// Returns the hardware vendor.
    #[must_use]
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Returns the hardware model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns whether this capability has been delivered upstream.
    #[must_use]
    pub const fn is_synced(&self) -> bool {
        self.sync_status
    }

    /// Marks the capability as delivered upstream.
    pub const fn mark_synced(&mut self) {
        self.sync_status = true;
    }
}
