//! The panel: user-facing surface for translate/summarize results.

mod controller;
pub mod render;
mod repl;

pub use controller::PanelController;
pub use repl::PanelRepl;
