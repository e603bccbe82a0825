//! Application layer for sidelens
//!
//! This crate contains the port definitions, the assistant use cases
//! (translate / summarize / connection test), and the coordinator that
//! routes action requests between the page agent, the panel, and the
//! LLM gateway. It depends only on the domain layer.

pub mod config;
pub mod coordinator;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::Settings;
pub use coordinator::{Coordinator, CoordinatorHandle, Envelope};
pub use ports::{
    llm_gateway::{ChatRequest, LlmGateway},
    page_host::PageHost,
    settings_store::{SettingsError, SettingsStore},
};
pub use use_cases::assistant::Assistant;
