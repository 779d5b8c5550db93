//! Lifecycle dispatch: backend selection, deadline-bounded plugin calls,
//! and the orchestration sequences built on top of them.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
