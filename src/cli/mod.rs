//! CLI definitions and output formatting

pub mod commands;
pub mod display;

pub use commands::{Cli, Commands, DEFAULT_WORKER};
