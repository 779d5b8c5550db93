//! `PostgreSQL` adapter for the instance registry.

mod models;
mod repository;
mod schema;

pub use repository::PostgresInstanceRegistry;
