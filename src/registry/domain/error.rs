//! Error types for host registry domain validation.

use thiserror::Error;

/// Errors returned while constructing host registry domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostDomainError {
    /// The host address is not a valid IPv4 dotted quad.
    #[error("host address '{0}' is not a valid IPv4 address")]
    InvalidAddress(String),

    /// The host name is empty after trimming.
    #[error("host name must not be empty")]
    EmptyHostName,

    /// The host name contains characters outside `[A-Za-z0-9_.-]`.
    #[error("host name '{0}' contains invalid characters")]
    InvalidHostName(String),

    /// The host name exceeds the 128-character storage limit.
    #[error("host name exceeds 128 character limit: {0}")]
    HostNameTooLong(String),

    /// A free-form field exceeds its storage limit.
    #[error("{field} exceeds {limit} character limit")]
    FieldTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// The storage limit that was exceeded.
        limit: usize,
    },

    /// The capability hardware type is empty after trimming.
    #[error("capability hardware type must not be empty")]
    EmptyHardwareType,
}
