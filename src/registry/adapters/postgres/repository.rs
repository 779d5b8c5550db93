//! `PostgreSQL` repository implementation for the host registry.

use super::{
    models::{CapabilityRow, HostRow, NewCapabilityRow, NewHostRow},
    schema::{host_capabilities, mec_hosts},
};
use crate::lifecycle::domain::BackendKind;
use crate::registry::{
    domain::{Capability, Host, HostAddress, HostName, PersistedHostData},
    ports::{HostRegistryError, HostRegistryResult, HostRepository},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use std::collections::HashMap;

/// `PostgreSQL` connection pool type used by the registry adapters.
pub type RegistryPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed host repository.
///
/// The admission check runs inside a single transaction, closing the
/// check-then-insert race the generic storage contract leaves open.
#[derive(Debug, Clone)]
pub struct PostgresHostRegistry {
    pool: RegistryPgPool,
}

impl PostgresHostRegistry {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: RegistryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> HostRegistryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> HostRegistryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(HostRegistryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(HostRegistryError::persistence)?
    }
}

impl From<diesel::result::Error> for HostRegistryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl HostRepository for PostgresHostRegistry {
    async fn upsert_capped(&self, host: &Host, capacity: usize) -> HostRegistryResult<()> {
        let new_row = host_to_new_row(host);
        let capability_rows = host_to_capability_rows(host);
        let address_text = host.address().to_string();

        self.run_blocking(move |connection| {
            connection.transaction::<(), HostRegistryError, _>(|connection| {
                let already_registered: i64 = mec_hosts::table
                    .filter(mec_hosts::address.eq(&address_text))
                    .count()
                    .get_result(connection)?;

                if already_registered == 0 {
                    let total: i64 = mec_hosts::table.count().get_result(connection)?;
                    let cap = i64::try_from(capacity).unwrap_or(i64::MAX);
                    if total >= cap {
                        return Err(HostRegistryError::AdmissionRejected { capacity });
                    }
                }

                diesel::insert_into(mec_hosts::table)
                    .values(&new_row)
                    .on_conflict(mec_hosts::address)
                    .do_update()
                    .set(&new_row)
                    .execute(connection)?;

                diesel::delete(
                    host_capabilities::table
                        .filter(host_capabilities::host_address.eq(&address_text)),
                )
                .execute(connection)?;

                diesel::insert_into(host_capabilities::table)
                    .values(&capability_rows)
                    .execute(connection)?;

                Ok(())
            })
        })
        .await
    }

    async fn find(&self, address: HostAddress) -> HostRegistryResult<Option<Host>> {
        let address_text = address.to_string();
        self.run_blocking(move |connection| {
            let row = mec_hosts::table
                .filter(mec_hosts::address.eq(&address_text))
                .select(HostRow::as_select())
                .first::<HostRow>(connection)
                .optional()
                .map_err(HostRegistryError::persistence)?;

            let Some(host_row) = row else {
                return Ok(None);
            };

            let capability_rows = host_capabilities::table
                .filter(host_capabilities::host_address.eq(&address_text))
                .order(host_capabilities::hw_type.asc())
                .select(CapabilityRow::as_select())
                .load::<CapabilityRow>(connection)
                .map_err(HostRegistryError::persistence)?;

            row_to_host(host_row, capability_rows).map(Some)
        })
        .await
    }

    async fn list(&self) -> HostRegistryResult<Vec<Host>> {
        self.run_blocking(move |connection| {
            let host_rows = mec_hosts::table
                .order(mec_hosts::address.asc())
                .select(HostRow::as_select())
                .load::<HostRow>(connection)
                .map_err(HostRegistryError::persistence)?;

            let capability_rows = host_capabilities::table
                .order(host_capabilities::hw_type.asc())
                .select(CapabilityRow::as_select())
                .load::<CapabilityRow>(connection)
                .map_err(HostRegistryError::persistence)?;

            let mut children: HashMap<String, Vec<CapabilityRow>> = HashMap::new();
            for capability_row in capability_rows {
                children
                    .entry(capability_row.host_address.clone())
                    .or_default()
                    .push(capability_row);
            }

            host_rows
                .into_iter()
                .map(|host_row| {
                    let owned = children.remove(&host_row.address).unwrap_or_default();
                    row_to_host(host_row, owned)
                })
                .collect()
        })
        .await
    }

    async fn delete(&self, address: HostAddress) -> HostRegistryResult<()> {
        let address_text = address.to_string();
        self.run_blocking(move |connection| {
            connection.transaction::<(), HostRegistryError, _>(|connection| {
                diesel::delete(
                    host_capabilities::table
                        .filter(host_capabilities::host_address.eq(&address_text)),
                )
                .execute(connection)?;

                let deleted = diesel::delete(
                    mec_hosts::table.filter(mec_hosts::address.eq(&address_text)),
                )
                .execute(connection)?;

                if deleted == 0 {
                    return Err(HostRegistryError::NotFound(address));
                }
                Ok(())
            })
        })
        .await
    }

    async fn count(&self) -> HostRegistryResult<usize> {
        self.run_blocking(move |connection| {
            let total: i64 = mec_hosts::table
                .count()
                .get_result(connection)
                .map_err(HostRegistryError::persistence)?;
            usize::try_from(total).map_err(HostRegistryError::persistence)
        })
        .await
    }

    async fn mark_synced(&self, addresses: &[HostAddress]) -> HostRegistryResult<()> {
        let address_texts: Vec<String> = addresses.iter().map(ToString::to_string).collect();
        self.run_blocking(move |connection| {
            connection.transaction::<(), HostRegistryError, _>(|connection| {
                diesel::update(
                    mec_hosts::table.filter(mec_hosts::address.eq_any(&address_texts)),
                )
                .set(mec_hosts::sync_status.eq(true))
                .execute(connection)?;

                diesel::update(
                    host_capabilities::table
                        .filter(host_capabilities::host_address.eq_any(&address_texts)),
                )
                .set(host_capabilities::sync_status.eq(true))
                .execute(connection)?;

                Ok(())
            })
        })
        .await
    }
}

fn host_to_new_row(host: &Host) -> NewHostRow {
    NewHostRow {
        address: host.address().to_string(),
        name: host.name().as_str().to_owned(),
        zip_code: host.zip_code().to_owned(),
        city: host.city().to_owned(),
        street_address: host.street_address().to_owned(),
        affinity: host.affinity().to_owned(),
        owner: host.owner().to_owned(),
        coordinates: host.coordinates().to_owned(),
        vim: host.vim().as_tag().to_owned(),
        origin: host.origin().to_owned(),
        sync_status: host.is_synced(),
        created_at: host.created_at(),
        updated_at: host.updated_at(),
    }
}

fn host_to_capability_rows(host: &Host) -> Vec<NewCapabilityRow> {
    host.capabilities()
        .iter()
        .map(|capability| NewCapabilityRow {
            hw_type: capability.hw_type().to_owned(),
            host_address: host.address().to_string(),
            vendor: capability.vendor().to_owned(),
            model: capability.model().to_owned(),
            sync_status: capability.is_synced(),
        })
        .collect()
}

fn row_to_host(
    host_row: HostRow,
    capability_rows: Vec<CapabilityRow>,
) -> HostRegistryResult<Host> {
    let HostRow {
        address,
        name,
        zip_code,
        city,
        street_address,
        affinity,
        owner,
        coordinates,
        vim,
        origin,
        sync_status,
        created_at,
        updated_at,
    } = host_row;

    let parsed_address =
        HostAddress::parse(&address).map_err(HostRegistryError::invalid_persisted_data)?;
    let parsed_name = HostName::new(name).map_err(HostRegistryError::invalid_persisted_data)?;
    let parsed_vim =
        BackendKind::from_tag(&vim).map_err(HostRegistryError::invalid_persisted_data)?;

    let capabilities = capability_rows
        .into_iter()
        .map(|capability_row| {
            Capability::from_persisted(
                capability_row.hw_type,
                capability_row.vendor,
                capability_row.model,
                capability_row.sync_status,
            )
        })
        .collect();

    let data = PersistedHostData {
        address: parsed_address,
        name: parsed_name,
        zip_code,
        city,
        street_address,
        affinity,
        owner,
        coordinates,
        vim: parsed_vim,
        origin,
        sync_status,
        capabilities,
        created_at,
        updated_at,
    };
    Ok(Host::from_persisted(data))
}
