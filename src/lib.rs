//! Edgelcm: lifecycle orchestration core for edge compute hosts.
//!
//! This crate manages a registry of edge hosts and the application instances
//! deployed onto them, dispatching lifecycle operations (instantiate,
//! terminate, query, configure) to heterogeneous backend plugins and keeping
//! the persisted registries consistent as remote calls succeed or fail.
//!
//! # Architecture
//!
//! Edgelcm follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, plugins)
//! - **Services**: Multi-step orchestration sequences over the above
//!
//! # Modules
//!
//! - [`registry`]: Host registry, capability inventory, and sync protocol
//! - [`instance`]: Application instance records and tenant bookkeeping
//! - [`lifecycle`]: Backend selection, bounded remote calls, orchestration
//! - [`config`]: Explicit configuration passed into service constructors
//! - [`error`]: The operation-level error taxonomy

pub mod config;
pub mod error;
pub mod instance;
pub mod lifecycle;
pub mod registry;
