//! Opaque access credential forwarded to backend plugins.

use std::fmt;

/// Already-verified access token passed through to remote plugin calls.
///
/// The core never inspects the token; it is redacted from debug output so
/// that request logging cannot leak it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps an access token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for transmission to a plugin.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
