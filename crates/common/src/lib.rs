//! Shared building blocks for the workspace: wire types that every binary
//! exposes and the tracing subscriber setup.

pub mod types;
pub mod utils;
