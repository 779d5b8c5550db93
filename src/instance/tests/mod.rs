//! Unit tests for the instance module.
