//! Diesel row models for host registry persistence.

use super::schema::{host_capabilities, mec_hosts};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for host records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = mec_hosts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HostRow {
    /// Registry identity (IPv4 dotted quad).
    pub address: String,
    /// Display name.
    pub name: String,
    /// Postal code of the host location.
    pub zip_code: String,
    /// City of the host location.
    pub city: String,
    /// Street address of the host location.
    pub street_address: String,
    /// Workload affinity tag.
    pub affinity: String,
    /// Owning user name.
    pub owner: String,
    /// Geographic coordinates.
    pub coordinates: String,
    /// Backend selector tag.
    pub vim: String,
    /// Origin of the registration request.
    pub origin: String,
    /// Whether the record has been delivered upstream.
    pub sync_status: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert/update model for host records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = mec_hosts)]
pub struct NewHostRow {
    /// Registry identity (IPv4 dotted quad).
    pub address: String,
    /// Display name.
    pub name: String,
    /// Postal code of the host location.
    pub zip_code: String,
    /// City of the host location.
    pub city: String,
    /// Street address of the host location.
    pub street_address: String,
    /// Workload affinity tag.
    pub affinity: String,
    /// Owning user name.
    pub owner: String,
    /// Geographic coordinates.
    pub coordinates: String,
    /// Backend selector tag.
    pub vim: String,
    /// Origin of the registration request.
    pub origin: String,
    /// Whether the record has been delivered upstream.
    pub sync_status: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for capability records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = host_capabilities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CapabilityRow {
    /// Hardware type (identity within the owning host).
    pub hw_type: String,
    /// Owning host address.
    pub host_address: String,
    /// Hardware vendor.
    pub vendor: String,
    /// Hardware model.
    pub model: String,
    /// Whether the record has been delivered upstream.
    pub sync_status: bool,
}

/// Insert model for capability records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = host_capabilities)]
pub struct NewCapabilityRow {
    /// Hardware type (identity within the owning host).
    pub hw_type: String,
    /// Owning host address.
    pub host_address: String,
    /// Hardware vendor.
    pub vendor: String,
    /// Hardware model.
    pub model: String,
    /// Whether the record has been delivered upstream.
    pub sync_status: bool,
}
