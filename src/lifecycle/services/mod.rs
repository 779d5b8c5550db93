//! Orchestration service driving the lifecycle sequences.

mod orchestrator;

pub use orchestrator::{InstantiateRequest, Orchestrator};
