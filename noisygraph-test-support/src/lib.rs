//! Shared test utilities used across noisygraph crates.

pub mod ci;
pub mod fixtures;
pub mod tracing;
