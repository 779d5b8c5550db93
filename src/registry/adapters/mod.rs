//! Adapter implementations of the host registry ports.

pub mod memory;
pub mod postgres;
