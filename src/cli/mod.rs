//! Command-line entry point
mod commands;

pub use commands::{Cli, run};
