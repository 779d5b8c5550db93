//! Diesel schema for instance registry persistence.

diesel::table! {
    /// Application instance records.
    app_instances (id) {
        /// Instance identifier.
        id -> Uuid,
        /// Address of the host running the instance.
        #[max_length = 15]
        host_address -> Varchar,
        /// Owning tenant identifier.
        #[max_length = 64]
        tenant_id -> Varchar,
        /// Application package identifier.
        package_id -> Varchar,
        /// Backend kind tag the instance was deployed through.
        #[max_length = 32]
        backend -> Varchar,
        /// Backend workload identifier.
        workload_id -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tenant bookkeeping rows, present while a tenant has instances.
    tenant_records (id) {
        /// Tenant identifier.
        #[max_length = 64]
        id -> Varchar,
    }
}
