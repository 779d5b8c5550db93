//! Adapter implementations of the instance registry ports.

pub mod memory;
pub mod postgres;
