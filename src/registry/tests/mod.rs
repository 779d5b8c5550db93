//! Unit tests for the registry module.
//!
//! Tests are organised by concern: domain validation, registration and
//! admission through the service layer, and the sync protocol.

mod service_tests;
mod sync_tests;
