//! The page agent: the in-process stand-in for code injected into a page.

mod agent;
mod extract;

pub use agent::{PageAgent, Shortcut};
pub use extract::visible_text;
