//! Validated host address type.

use super::HostDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// IPv4 address identifying a registered edge host.
///
/// The address is the host's registry identity; two hosts never share one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct HostAddress(Ipv4Addr);

impl HostAddress {
    /// Parses a dotted-quad IPv4 address.
    ///
    /// # Errors
    ///
    /// Returns [`HostDomainError::InvalidAddress`] when the value is not a
    /// valid IPv4 address.
    pub fn parse(value: &str) -> Result<Self, HostDomainError> {
        value
            .trim()
            .parse::<Ipv4Addr>()
            .map(Self)
            .map_err(|_| HostDomainError::InvalidAddress(value.to_owned()))
    }

    /// Creates a host address from an already-parsed IPv4 address.
    #[must_use]
    pub const fn from_ipv4(address: Ipv4Addr) -> Self {
        Self(address)
    }

    /// Returns the wrapped IPv4 address.
    #[must_use]
    pub const fn into_inner(self) -> Ipv4Addr {
        self.0
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
