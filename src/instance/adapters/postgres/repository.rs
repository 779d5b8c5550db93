//! `PostgreSQL` repository implementation for the instance registry.

use super::{
    models::{InstanceRow, NewInstanceRow, NewTenantRow},
    schema::{app_instances, tenant_records},
};
use crate::instance::{
    domain::{AppInstanceId, InstanceRecord, PersistedInstanceData, TenantId},
    ports::{InstanceRegistryError, InstanceRegistryResult, InstanceRepository},
};
use crate::lifecycle::domain::BackendKind;
use crate::registry::adapters::postgres::RegistryPgPool;
use crate::registry::domain::HostAddress;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed instance repository.
#[derive(Debug, Clone)]
pub struct PostgresInstanceRegistry {
    pool: RegistryPgPool,
}

impl PostgresInstanceRegistry {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: RegistryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> InstanceRegistryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> InstanceRegistryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(InstanceRegistryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(InstanceRegistryError::persistence)?
    }
}

#[async_trait]
impl InstanceRepository for PostgresInstanceRegistry {
    async fn insert(&self, record: &InstanceRecord) -> InstanceRegistryResult<()> {
        let instance_id = record.id();
        let new_row = record_to_new_row(record);

        self.run_blocking(move |connection| {
            diesel::insert_into(app_instances::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        InstanceRegistryError::Duplicate(instance_id)
                    }
                    _ => InstanceRegistryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find(&self, id: AppInstanceId) -> InstanceRegistryResult<Option<InstanceRecord>> {
        self.run_blocking(move |connection| {
            let row = app_instances::table
                .filter(app_instances::id.eq(id.into_inner()))
                .select(InstanceRow::as_select())
                .first::<InstanceRow>(connection)
                .optional()
                .map_err(InstanceRegistryError::persistence)?;
            row.map(row_to_record).transpose()
        })
        .await
    }

    async fn delete(&self, id: AppInstanceId) -> InstanceRegistryResult<()> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(app_instances::table.filter(app_instances::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(InstanceRegistryError::persistence)?;
            if deleted == 0 {
                return Err(InstanceRegistryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn list(&self) -> InstanceRegistryResult<Vec<InstanceRecord>> {
        self.run_blocking(move |connection| {
            let rows = app_instances::table
                .order(app_instances::id.asc())
                .select(InstanceRow::as_select())
                .load::<InstanceRow>(connection)
                .map_err(InstanceRegistryError::persistence)?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }

    async fn list_by_host(
        &self,
        address: HostAddress,
    ) -> InstanceRegistryResult<Vec<InstanceRecord>> {
        let address_text = address.to_string();
        self.run_blocking(move |connection| {
            let rows = app_instances::table
                .filter(app_instances::host_address.eq(&address_text))
                .order(app_instances::id.asc())
                .select(InstanceRow::as_select())
                .load::<InstanceRow>(connection)
                .map_err(InstanceRegistryError::persistence)?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }

    async fn record_tenant(&self, tenant: &TenantId) -> InstanceRegistryResult<()> {
        let new_row = NewTenantRow {
            id: tenant.as_str().to_owned(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(tenant_records::table)
                .values(&new_row)
                .on_conflict(tenant_records::id)
                .do_nothing()
                .execute(connection)
                .map_err(InstanceRegistryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn delete_tenant(&self, tenant: &TenantId) -> InstanceRegistryResult<()> {
        let tenant_text = tenant.as_str().to_owned();
        self.run_blocking(move |connection| {
            diesel::delete(tenant_records::table.filter(tenant_records::id.eq(&tenant_text)))
                .execute(connection)
                .map_err(InstanceRegistryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn tenant_instance_count(&self, tenant: &TenantId) -> InstanceRegistryResult<usize> {
        let tenant_text = tenant.as_str().to_owned();
        self.run_blocking(move |connection| {
            let total: i64 = app_instances::table
                .filter(app_instances::tenant_id.eq(&tenant_text))
                .count()
                .get_result(connection)
                .map_err(InstanceRegistryError::persistence)?;
            usize::try_from(total).map_err(InstanceRegistryError::persistence)
        })
        .await
    }
}

fn record_to_new_row(record: &InstanceRecord) -> NewInstanceRow {
    NewInstanceRow {
        id: record.id().into_inner(),
        host_address: record.host_address().to_string(),
        tenant_id: record.tenant().as_str().to_owned(),
        package_id: record.package_id().to_owned(),
        backend: record.backend().as_tag().to_owned(),
        workload_id: record.workload_id().to_owned(),
        created_at: record.created_at(),
    }
}

fn row_to_record(row: InstanceRow) -> InstanceRegistryResult<InstanceRecord> {
    let InstanceRow {
        id,
        host_address,
        tenant_id,
        package_id,
        backend,
        workload_id,
        created_at,
    } = row;

    let parsed_address =
        HostAddress::parse(&host_address).map_err(InstanceRegistryError::invalid_persisted_data)?;
    let parsed_tenant =
        TenantId::new(tenant_id).map_err(InstanceRegistryError::invalid_persisted_data)?;
    let parsed_backend =
        BackendKind::from_tag(&backend).map_err(InstanceRegistryError::invalid_persisted_data)?;

    let data = PersistedInstanceData {
        id: AppInstanceId::from_uuid(id),
        host_address: parsed_address,
        tenant: parsed_tenant,
        package_id,
        backend: parsed_backend,
        workload_id,
        created_at,
    };
    Ok(InstanceRecord::from_persisted(data))
}
