//! Library side of the `docstratum` binary.
//!
//! Exposed so integration tests can drive commands without spawning a process.

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
pub mod report;
