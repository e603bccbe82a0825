//! Domain layer for sidelens
//!
//! This crate contains the core entities, value objects, and the
//! inter-context message contract. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Three contexts, one contract
//!
//! sidelens connects three isolated components — the page agent, the
//! coordinator, and the panel — through a single typed request/response
//! contract ([`message::Request`] / [`message::Reply`]). Everything that
//! crosses a context boundary is expressed in this module's types.
//!
//! ## Selection
//!
//! Exactly one [`Selection`] register exists system-wide, owned by the
//! coordinator. It is overwritten by each selection event and cleared on
//! tab activation or page-load completion.

pub mod core;
pub mod language;
pub mod message;
pub mod prompt;
pub mod selection;

// Re-export commonly used types
pub use crate::core::error::AssistError;
pub use crate::core::text::{clip_chars, clip_chars_silent};
pub use language::Language;
pub use message::{HostEvent, PanelEvent, Reply, Request};
pub use prompt::{ChatMessage, PromptTemplate, Role};
pub use selection::Selection;
