//! Support library for the `noisygraph` binary.
//!
//! Exposes the command pipeline, graph models and logging set-up so tests
//! and doctests can drive them without spawning a process.

pub mod cli;
pub mod generators;
pub mod logging;
