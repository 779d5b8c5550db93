//! Identifier types for the application instance domain.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Maximum length for a tenant identifier.
const MAX_TENANT_ID_LENGTH: usize = 64;

/// Errors returned while constructing instance domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InstanceDomainError {
    /// The application instance id is not a valid UUID.
    #[error("app instance id '{0}' is not a valid UUID")]
    InvalidInstanceId(String),

    /// The tenant id is empty after trimming.
    #[error("tenant id must not be empty")]
    EmptyTenantId,

    /// The tenant id exceeds the 64-character storage limit.
    #[error("tenant id exceeds 64 character limit: {0}")]
    TenantIdTooLong(String),
}

/// Unique identifier for a deployed application instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppInstanceId(Uuid);

impl AppInstanceId {
    /// Creates a new random instance identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an instance identifier from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceDomainError::InvalidInstanceId`] when the value is
    /// not a valid UUID.
    pub fn parse(value: &str) -> Result<Self, InstanceDomainError> {
        value
            .trim()
            .parse::<Uuid>()
            .map(Self)
            .map_err(|_| InstanceDomainError::InvalidInstanceId(value.to_owned()))
    }

    /// Creates an instance identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for AppInstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AppInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated tenant identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a validated tenant identifier.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceDomainError::EmptyTenantId`] when the value is
    /// empty after trimming, or [`InstanceDomainError::TenantIdTooLong`]
    /// when it exceeds 64 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, InstanceDomainError> {
        let raw = value.into();
        let trimmed = raw.trim().to_owned();

        if trimmed.is_empty() {
            return Err(InstanceDomainError::EmptyTenantId);
        }
        if trimmed.len() > MAX_TENANT_ID_LENGTH {
            return Err(InstanceDomainError::TenantIdTooLong(raw));
        }
        Ok(Self(trimmed))
    }

    /// Returns the tenant id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
