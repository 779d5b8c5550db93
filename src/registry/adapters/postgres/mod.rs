//! `PostgreSQL` adapter for the host registry.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresHostRegistry, RegistryPgPool};
