//! Diesel schema for host registry persistence.

diesel::table! {
    /// Registered edge host records.
    mec_hosts (address) {
        /// Registry identity (IPv4 dotted quad).
        #[max_length = 15]
        address -> Varchar,
        /// Display name.
        #[max_length = 128]
        name -> Varchar,
        /// Postal code of the host location.
        zip_code -> Varchar,
        /// City of the host location.
        city -> Varchar,
        /// Street address of the host location.
        #[max_length = 256]
        street_address -> Varchar,
        /// Workload affinity tag.
        affinity -> Varchar,
        /// Owning user name.
        owner -> Varchar,
        /// Geographic coordinates.
        #[max_length = 128]
        coordinates -> Varchar,
        /// Backend selector tag.
        #[max_length = 32]
        vim -> Varchar,
        /// Origin of the registration request.
        origin -> Varchar,
        /// Whether the record has been delivered upstream.
        sync_status -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Hardware capability children, owned by host records.
    host_capabilities (hw_type, host_address) {
        /// Hardware type (identity within the owning host).
        hw_type -> Varchar,
        /// Owning host address.
        #[max_length = 15]
        host_address -> Varchar,
        /// Hardware vendor.
        vendor -> Varchar,
        /// Hardware model.
        model -> Varchar,
        /// Whether the record has been delivered upstream.
        sync_status -> Bool,
    }
}

diesel::joinable!(host_capabilities -> mec_hosts (host_address));
diesel::allow_tables_to_appear_in_same_query!(mec_hosts, host_capabilities);
