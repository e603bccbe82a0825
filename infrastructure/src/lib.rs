//! Infrastructure layer for sidelens
//!
//! This crate contains the adapters that implement the ports defined in
//! the application layer: the Moonshot chat-completions gateway, the
//! TOML-backed settings store, and the in-process page agent.

pub mod config;
pub mod moonshot;
pub mod page;

// Re-export commonly used types
pub use config::FileSettingsStore;
pub use moonshot::MoonshotGateway;
pub use page::{PageAgent, Shortcut};
