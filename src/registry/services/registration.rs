//! Host registration and discovery service.

use crate::config::LcmConfig;
use crate::error::LcmResult;
use crate::lifecycle::domain::BackendKind;
use crate::registry::{
    domain::{Capability, Host, HostAddress, HostName, NewHostData},
    ports::HostRepository,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Hardware capability fields carried in a registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityData {
    /// Hardware type.
    pub hw_type: String,
    /// Hardware vendor.
    pub vendor: String,
    /// Hardware model.
    pub model: String,
}

/// Request payload for registering (or updating) a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterHostRequest {
    address: String,
    name: String,
    vim_tag: String,
    owner: String,
    zip_code: String,
    city: String,
    street_address: String,
    affinity: String,
    coordinates: String,
    origin: String,
    capabilities: Vec<CapabilityData>,
}

impl RegisterHostRequest {
    /// Creates a request with the required host fields.
    #[must_use]
    pub fn new(
        address: impl Into<String>,
        name: impl Into<String>,
        vim_tag: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
            vim_tag: vim_tag.into(),
            owner: owner.into(),
            zip_code: String::new(),
            city: String::new(),
            street_address: String::new(),
            affinity: String::new(),
            coordinates: String::new(),
            origin: String::new(),
            capabilities: Vec::new(),
        }
    }

    /// Sets the host location fields.
    #[must_use]
    pub fn with_location(
        mut self,
        zip_code: impl Into<String>,
        city: impl Into<String>,
        street_address: impl Into<String>,
    ) -> Self {
        self.zip_code = zip_code.into();
        self.city = city.into();
        self.street_address = street_address.into();
        self
    }

    /// Sets the geographic coordinates.
    #[must_use]
    pub fn with_coordinates(mut self, coordinates: impl Into<String>) -> Self {
        self.coordinates = coordinates.into();
        self
    }

    /// Sets the workload affinity tag.
    #[must_use]
    pub fn with_affinity(mut self, affinity: impl Into<String>) -> Self {
        self.affinity = affinity.into();
        self
    }

    /// Sets the origin of the registration request.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Appends a hardware capability.
    #[must_use]
    pub fn with_capability(
        mut self,
        hw_type: impl Into<String>,
        vendor: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        self.capabilities.push(CapabilityData {
            hw_type: hw_type.into(),
            vendor: vendor.into(),
            model: model.into(),
        });
        self
    }
}

/// Host registration and discovery service.
///
/// Registration is an upsert: re-registering a known address replaces the
/// host record and its capability children, and resets the sync flag so the
/// update is delivered upstream on the next cycle. New entries are admitted
/// against the configured registry cap.
#[derive(Clone)]
pub struct HostRegistryService<H, C>
where
    H: HostRepository,
    C: Clock + Send + Sync,
{
    hosts: Arc<H>,
    clock: Arc<C>,
    capacity: usize,
}

impl<H, C> HostRegistryService<H, C>
where
    H: HostRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new host registry service.
    #[must_use]
    pub const fn new(hosts: Arc<H>, clock: Arc<C>, config: &LcmConfig) -> Self {
        Self {
            hosts,
            clock,
            capacity: config.max_host_records(),
        }
    }

    /// Registers a new host or updates an existing one.
    ///
    /// # Errors
    ///
    /// Returns [`LcmError::Validation`] when a field fails validation,
    /// [`LcmError::BackendUnavailable`] when the selector tag matches no
    /// backend, [`LcmError::AdmissionRejected`] when a new entry would
    /// exceed the registry cap, or [`LcmError::Persistence`] when the store
    /// rejects the write.
    pub async fn register(&self, request: RegisterHostRequest) -> LcmResult<Host> {
        let RegisterHostRequest {
            address,
            name,
            vim_tag,
            owner,
            zip_code,
            city,
            street_address,
            affinity,
            coordinates,
            origin,
            capabilities,
        } = request;

        let host_address = HostAddress::parse(&address)?;
        let host_name = HostName::new(name)?;
        let vim = BackendKind::from_tag(&vim_tag)?;
        let capability_values = capabilities
            .into_iter()
            .map(|data| Capability::new(data.hw_type, data.vendor, data.model))
            .collect::<Result<Vec<_>, _>>()?;

        let host = Host::new(
            NewHostData {
                address: host_address,
                name: host_name,
                zip_code,
                city,
                street_address,
                affinity,
                owner,
                coordinates,
                vim,
                origin,
                capabilities: capability_values,
            },
            &*self.clock,
        )?;

        self.hosts.upsert_capped(&host, self.capacity).await?;
        info!(host = %host.address(), vim = %host.vim(), "host registered");
        Ok(host)
    }

    /// Returns all registered hosts with their capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`LcmError::Persistence`] when the store read fails.
    pub async fn list(&self) -> LcmResult<Vec<Host>> {
        Ok(self.hosts.list().await?)
    }

    /// Finds a host by address.
    ///
    /// Returns `Ok(None)` when the host is not registered.
    ///
    /// # Errors
    ///
    /// Returns [`LcmError::Persistence`] when the store read fails.
    pub async fn find(&self, address: HostAddress) -> LcmResult<Option<Host>> {
        Ok(self.hosts.find(address).await?)
    }
}
