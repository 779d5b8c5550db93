//! Unit tests for the lifecycle module.
//!
//! Tests cover backend tag resolution, the deadline-bounded adapter, and
//! the orchestration sequences end to end over the in-memory registries.

mod adapter_tests;
mod domain_tests;
mod support;
