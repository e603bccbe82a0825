//! Presentation layer for sidelens
//!
//! The panel (result surface with its busy guards and renderer) and the
//! CLI argument definitions. Everything here is a client of the
//! coordinator's message contract.

pub mod cli;
pub mod panel;

// Re-export commonly used types
pub use cli::{Cli, Command};
pub use panel::{PanelController, PanelRepl, render};
