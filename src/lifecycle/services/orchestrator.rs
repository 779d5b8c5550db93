//! Multi-step lifecycle orchestration over the registries and adapters.

use crate::error::{LcmError, LcmResult};
use crate::instance::{
    domain::{AppAuthConfig, AppInstanceId, InstanceRecord, TenantId},
    ports::{AuthConfigStore, InstanceRepository},
};
use crate::lifecycle::adapters::{AdapterSelector, PluginAdapter};
use crate::lifecycle::domain::{Credential, RemoteStatus};
use crate::registry::{
    domain::{Host, HostAddress},
    ports::HostRepository,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{info, warn};

/// Request payload for instantiating an application on a host.
#[derive(Debug, Clone)]
pub struct InstantiateRequest {
    /// Caller-assigned instance identifier.
    pub instance_id: AppInstanceId,
    /// Target host.
    pub host_address: HostAddress,
    /// Tenant the instance belongs to.
    pub tenant: TenantId,
    /// Application package identifier.
    pub package_id: String,
    /// Reference to the deployable artifact.
    pub artifact: String,
    /// Access credential forwarded to the plugin.
    pub credential: Credential,
}

/// Lifecycle orchestrator.
///
/// Drives instantiate, terminate, batch-terminate, host-deletion, query and
/// configuration sequences over the host registry, the instance registry,
/// and the backend adapters. Every operation handles one request
/// independently; the persisted registries are the only shared state, and
/// sub-steps of batch and cascading operations run strictly sequentially.
///
/// Sequences are forward-only: the first error halts the remainder and is
/// surfaced as-is, with no compensation of already-completed steps.
#[derive(Clone)]
pub struct Orchestrator<H, I, A, C>
where
    H: HostRepository,
    I: InstanceRepository,
    A: AuthConfigStore,
    C: Clock + Send + Sync,
{
    hosts: Arc<H>,
    instances: Arc<I>,
    auth_configs: Arc<A>,
    selector: AdapterSelector,
    clock: Arc<C>,
}

impl<H, I, A, C> Orchestrator<H, I, A, C>
where
    H: HostRepository,
    I: InstanceRepository,
    A: AuthConfigStore,
    C: Clock + Send + Sync,
{
    /// Creates a new orchestrator over the given registries and adapters.
    #[must_use]
    pub const fn new(
        hosts: Arc<H>,
        instances: Arc<I>,
        auth_configs: Arc<A>,
        selector: AdapterSelector,
        clock: Arc<C>,
    ) -> Self {
        Self {
            hosts,
            instances,
            auth_configs,
            selector,
            clock,
        }
    }

    /// Deploys an application instance onto a host.
    ///
    /// The instance record is created only after the remote instantiation
    /// is confirmed successful; any failure before that point aborts with
    /// no local write.
    ///
    /// # Errors
    ///
    /// Returns [`LcmError::NotFound`] when the host is not registered,
    /// [`LcmError::Validation`] when the instance id is already in use,
    /// [`LcmError::RemoteTimeout`] or [`LcmError::RemoteFailure`] from the
    /// plugin call, or [`LcmError::Persistence`] when a registry write
    /// fails after the remote call succeeded.
    pub async fn instantiate(&self, request: InstantiateRequest) -> LcmResult<InstanceRecord> {
        info!(instance = %request.instance_id, host = %request.host_address, "instantiate requested");

        if self.instances.find(request.instance_id).await?.is_some() {
            return Err(LcmError::Validation(format!(
                "app instance {} already exists",
                request.instance_id
            )));
        }

        let host = self.host_or_not_found(request.host_address).await?;
        let adapter = self.selector.resolve(host.vim());

        let outcome = adapter
            .instantiate(
                &request.artifact,
                request.host_address,
                &request.credential,
                request.instance_id,
            )
            .await?;

        // Remote success confirmed; local writes follow.
        self.auth_configs
            .store(request.instance_id, AppAuthConfig::generate())
            .await?;

        let record = InstanceRecord::new(
            request.instance_id,
            request.host_address,
            request.tenant.clone(),
            request.package_id,
            host.vim(),
            outcome.workload_id,
            &*self.clock,
        );
        self.instances.insert(&record).await?;
        self.instances.record_tenant(&request.tenant).await?;

        info!(instance = %record.id(), "instantiate completed");
        Ok(record)
    }

    /// Tears down an application instance and its local records.
    ///
    /// The sequence is forward-only and not atomic: remote teardown, then
    /// auth-config removal, then record deletion, then tenant bookkeeping
    /// cleanup. A failure partway leaves the remote workload gone with the
    /// local record still present; re-invoking terminate is the expected
    /// recovery path, and the remote step treats an already-absent workload
    /// as success-equivalent to keep that re-invocation safe.
    ///
    /// # Errors
    ///
    /// Returns [`LcmError::NotFound`] when the instance (or its host) is
    /// unknown, [`LcmError::RemoteTimeout`] or [`LcmError::RemoteFailure`]
    /// from the plugin call, or [`LcmError::Persistence`] when a local
    /// teardown step fails.
    pub async fn terminate(
        &self,
        instance_id: AppInstanceId,
        credential: &Credential,
    ) -> LcmResult<RemoteStatus> {
        info!(instance = %instance_id, "terminate requested");

        let record = self.record_or_not_found(instance_id).await?;
        let adapter = self.adapter_for(&record).await?;

        let status = adapter
            .terminate(record.host_address(), credential, instance_id)
            .await?;

        self.auth_configs.remove(instance_id).await?;
        self.instances.delete(instance_id).await?;

        if self.instances.tenant_instance_count(record.tenant()).await? == 0 {
            self.instances.delete_tenant(record.tenant()).await?;
        }

        info!(instance = %instance_id, %status, "terminate completed");
        Ok(status)
    }

    /// Terminates a tenant's instances strictly in the given order.
    ///
    /// The whole list is validated before anything executes; processing
    /// stops at the first failing entry and surfaces its error without
    /// attempting the remaining entries or reporting per-entry outcomes.
    /// Sequential execution is deliberate: each instance's full teardown
    /// completes before the next starts.
    ///
    /// The tenant id scopes the request for logging only; ownership of the
    /// listed instances by that tenant is not checked here. Callers that
    /// need tenant isolation must enforce it before invoking the batch.
    ///
    /// # Errors
    ///
    /// Returns [`LcmError::Validation`] when the list is empty or contains
    /// a malformed id (nothing is executed), or the first per-instance
    /// error from [`Self::terminate`].
    pub async fn batch_terminate(
        &self,
        tenant: &TenantId,
        raw_instance_ids: &[String],
        credential: &Credential,
    ) -> LcmResult<usize> {
        info!(%tenant, count = raw_instance_ids.len(), "batch terminate requested");

        if raw_instance_ids.is_empty() {
            return Err(LcmError::Validation(
                "batch terminate requires at least one instance id".to_owned(),
            ));
        }

        let instance_ids = raw_instance_ids
            .iter()
            .map(|raw| AppInstanceId::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;

        for instance_id in &instance_ids {
            self.terminate(*instance_id, credential).await?;
        }

        info!(%tenant, terminated = instance_ids.len(), "batch terminate completed");
        Ok(instance_ids.len())
    }

    /// Deletes a host after tearing down every instance it owns.
    ///
    /// Each owned instance runs the full terminate sequence before the
    /// host row and its capabilities are removed. If any nested terminate
    /// fails, the host entry and its remaining instances are left in place
    /// for a later retry; this consistency gap is deliberate and surfaced,
    /// not hidden.
    ///
    /// # Errors
    ///
    /// Returns [`LcmError::NotFound`] when the host is not registered, or
    /// the first error from a nested terminate sequence.
    pub async fn delete_host(
        &self,
        address: HostAddress,
        credential: &Credential,
    ) -> LcmResult<()> {
        info!(host = %address, "host deletion requested");

        let owned = self.instances.list_by_host(address).await?;
        for record in &owned {
            if let Err(err) = self.terminate(record.id(), credential).await {
                warn!(host = %address, instance = %record.id(), "host deletion halted by failed terminate");
                return Err(err);
            }
        }

        self.hosts.delete(address).await?;
        info!(host = %address, instances = owned.len(), "host deleted");
        Ok(())
    }

    /// Queries workload status on the host running an instance.
    ///
    /// # Errors
    ///
    /// Returns [`LcmError::NotFound`] when the instance (or its host) is
    /// unknown, or a remote classification from the plugin call.
    pub async fn query(&self, instance_id: AppInstanceId) -> LcmResult<RemoteStatus> {
        let record = self.record_or_not_found(instance_id).await?;
        let adapter = self.adapter_for(&record).await?;
        Ok(adapter.query(record.host_address()).await?)
    }

    /// Creates an image from a VM workload of an instance and returns the
    /// plugin's raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`LcmError::NotFound`] when the instance (or its host) is
    /// unknown, or a remote classification from the plugin call.
    pub async fn create_image(
        &self,
        instance_id: AppInstanceId,
        credential: &Credential,
        vm_id: &str,
    ) -> LcmResult<String> {
        info!(instance = %instance_id, vm = vm_id, "image creation requested");
        let record = self.record_or_not_found(instance_id).await?;
        let adapter = self.adapter_for(&record).await?;
        Ok(adapter
            .create_image(record.host_address(), credential, instance_id, vm_id)
            .await?)
    }

    /// Uploads backend configuration material to a host.
    ///
    /// # Errors
    ///
    /// Returns [`LcmError::NotFound`] when the host is not registered, or
    /// a remote classification from the plugin call.
    pub async fn upload_config(
        &self,
        address: HostAddress,
        content: &[u8],
        credential: &Credential,
    ) -> LcmResult<RemoteStatus> {
        info!(host = %address, "config upload requested");
        let host = self.host_or_not_found(address).await?;
        let adapter = self.selector.resolve(host.vim());
        Ok(adapter.upload_config(content, address, credential).await?)
    }

    /// Removes previously uploaded backend configuration from a host.
    ///
    /// # Errors
    ///
    /// Returns [`LcmError::NotFound`] when the host is not registered, or
    /// a remote classification from the plugin call.
    pub async fn remove_config(
        &self,
        address: HostAddress,
        credential: &Credential,
    ) -> LcmResult<RemoteStatus> {
        info!(host = %address, "config removal requested");
        let host = self.host_or_not_found(address).await?;
        let adapter = self.selector.resolve(host.vim());
        Ok(adapter.remove_config(address, credential).await?)
    }

    /// Returns all application instance records.
    ///
    /// # Errors
    ///
    /// Returns [`LcmError::Persistence`] when the store read fails.
    pub async fn list_instances(&self) -> LcmResult<Vec<InstanceRecord>> {
        Ok(self.instances.list().await?)
    }

    async fn host_or_not_found(&self, address: HostAddress) -> LcmResult<Host> {
        self.hosts
            .find(address)
            .await?
            .ok_or_else(|| LcmError::NotFound(format!("host {address}")))
    }

    async fn record_or_not_found(&self, instance_id: AppInstanceId) -> LcmResult<InstanceRecord> {
        self.instances
            .find(instance_id)
            .await?
            .ok_or_else(|| LcmError::NotFound(format!("app instance {instance_id}")))
    }

    /// Resolves the adapter for a record through its owning host's
    /// selector field.
    async fn adapter_for(&self, record: &InstanceRecord) -> LcmResult<PluginAdapter> {
        let host = self.host_or_not_found(record.host_address()).await?;
        Ok(self.selector.resolve(host.vim()))
    }
}
