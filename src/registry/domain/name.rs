//! Validated host display name type.

use super::HostDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a host name, matching the `VARCHAR(128)` column.
const MAX_NAME_LENGTH: usize = 128;

/// Validated display name for a registered host.
///
/// Names are trimmed and restricted to letters, digits, `_`, `-` and `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostName(String);

impl HostName {
    /// Creates a validated host name.
    ///
    /// # Errors
    ///
    /// Returns [`HostDomainError::EmptyHostName`] when the value is empty
    /// after trimming, [`HostDomainError::HostNameTooLong`] when it exceeds
    /// 128 characters, or [`HostDomainError::InvalidHostName`] when it
    /// contains characters outside `[A-Za-z0-9_.-]`.
    pub fn new(value: impl Into<String>) -> Result<Self, HostDomainError> {
        let raw = value.into();
        let trimmed = raw.trim().to_owned();

        if trimmed.is_empty() {
            return Err(HostDomainError::EmptyHostName);
        }

        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(HostDomainError::HostNameTooLong(raw));
        }

        let is_valid = trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.');

        if !is_valid {
            return Err(HostDomainError::InvalidHostName(raw));
        }

        Ok(Self(trimmed))
    }

    /// Returns the host name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for HostName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for HostName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
