//! CLI argument definitions.

mod commands;

pub use commands::{Cli, Command};
