//! Diesel row models for instance registry persistence.

use super::schema::{app_instances, tenant_records};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for instance records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = app_instances)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InstanceRow {
    /// Instance identifier.
    pub id: uuid::Uuid,
    /// Address of the host running the instance.
    pub host_address: String,
    /// Owning tenant identifier.
    pub tenant_id: String,
    /// Application package identifier.
    pub package_id: String,
    /// Backend kind tag.
    pub backend: String,
    /// Backend workload identifier.
    pub workload_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for instance records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = app_instances)]
pub struct NewInstanceRow {
    /// Instance identifier.
    pub id: uuid::Uuid,
    /// Address of the host running the instance.
    pub host_address: String,
    /// Owning tenant identifier.
    pub tenant_id: String,
    /// Application package identifier.
    pub package_id: String,
    /// Backend kind tag.
    pub backend: String,
    /// Backend workload identifier.
    pub workload_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for tenant bookkeeping rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tenant_records)]
pub struct NewTenantRow {
    /// Tenant identifier.
    pub id: String,
}
