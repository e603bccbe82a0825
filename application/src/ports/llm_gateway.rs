//! LLM Gateway port
//!
//! Defines the single call primitive the assistant flows share. Translate
//! and summarize differ only in prompt content, temperature, and token
//! budget, so one `complete` method covers both (plus the connection
//! probe).

use async_trait::async_trait;
use sidelens_domain::{AssistError, ChatMessage};

/// One chat-completion call, fully specified.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: 0.3,
            max_tokens: 2000,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Gateway to the completion endpoint.
///
/// Implementations perform the HTTP call and normalize every failure —
/// transport, non-2xx status, malformed body — into
/// [`AssistError::Api`]. The API key is passed per call: key presence is
/// checked by the caller before any transport work happens.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a completion request and return the trimmed assistant text.
    async fn complete(&self, api_key: &str, request: ChatRequest) -> Result<String, AssistError>;
}
