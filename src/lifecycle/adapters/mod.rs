//! Adapter layer binding backend kinds to deadline-bounded plugin calls.

mod plugin;
mod selector;

pub use plugin::{AdapterError, AdapterResult, PluginAdapter};
pub use selector::AdapterSelector;
