//! Explicit configuration for the lifecycle core.
//!
//! All tunables are carried in [`LcmConfig`] and handed to service
//! constructors; there is no ambient global state or process-wide
//! initialization.

use std::time::Duration;

/// Default deadline for a single remote plugin call.
const DEFAULT_REMOTE_DEADLINE: Duration = Duration::from_secs(180);

/// Default cap on the number of host registry entries.
const DEFAULT_MAX_HOST_RECORDS: usize = 50;

/// Configuration for the orchestration services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcmConfig {
    remote_deadline: Duration,
    max_host_records: usize,
}

impl LcmConfig {
    /// Creates a configuration with the default deadline and registry cap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            remote_deadline: DEFAULT_REMOTE_DEADLINE,
            max_host_records: DEFAULT_MAX_HOST_RECORDS,
        }
    }

    /// Sets the deadline applied to every remote plugin call.
    #[must_use]
    pub const fn with_remote_deadline(mut self, deadline: Duration) -> Self {
        self.remote_deadline = deadline;
        self
    }

    /// Sets the maximum number of host registry entries admitted.
    #[must_use]
    pub const fn with_max_host_records(mut self, max: usize) -> Self {
        self.max_host_records = max;
        self
    }

    /// Returns the deadline applied to every remote plugin call.
    #[must_use]
    pub const fn remote_deadline(&self) -> Duration {
        self.remote_deadline
    }

    /// Returns the maximum number of host registry entries admitted.
    #[must_use]
    pub const fn max_host_records(&self) -> usize {
        self.max_host_records
    }
}

impl Default for LcmConfig {
    fn default() -> Self {
        Self::new()
    }
}
