//! Integration test utilities for the blog server
//!
//! Spawns the real API (and optionally a task processor) on an ephemeral
//! port and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
