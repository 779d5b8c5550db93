//! Port contracts for remote lifecycle plugins.

mod client;

pub use client::{ClientError, ClientResult, LifecycleClient};
