//! Backend kind to adapter resolution.

use super::PluginAdapter;
use crate::config::LcmConfig;
use crate::lifecycle::domain::BackendKind;
use crate::lifecycle::ports::LifecycleClient;
use std::sync::Arc;
use std::time::Duration;

/// Resolves a backend kind to its deadline-bounded adapter.
///
/// The selector owns one raw client per backend kind and dispatches
/// exhaustively over [`BackendKind`]; unresolvable tags never reach it
/// because they fail at parse time.
#[derive(Clone)]
pub struct AdapterSelector {
    kubernetes: Arc<dyn LifecycleClient>,
    openstack: Arc<dyn LifecycleClient>,
    deadline: Duration,
}

impl AdapterSelector {
    /// Creates a selector over the per-backend plugin clients; the
    /// configured remote deadline governs every adapter it resolves.
    #[must_use]
    pub const fn new(
        kubernetes: Arc<dyn LifecycleClient>,
        openstack: Arc<dyn LifecycleClient>,
        config: &LcmConfig,
    ) -> Self {
        Self {
            kubernetes,
            openstack,
            deadline: config.remote_deadline(),
        }
    }

    /// Returns the adapter governing the given backend kind.
    #[must_use]
    pub fn resolve(&self, kind: BackendKind) -> PluginAdapter {
        let client = match kind {
            BackendKind::Kubernetes => Arc::clone(&self.kubernetes),
            BackendKind::OpenStack => Arc::clone(&self.openstack),
        };
        PluginAdapter::new(client, self.deadline)
    }
}
