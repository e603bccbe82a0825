//! The assistant: translate, summarize, and connection-test flows.
//!
//! Both main flows reduce to "one prompt template + one gateway call",
//! differing only in prompt content, temperature, and token budget, so they
//! share [`LlmGateway::complete`] rather than carrying separate state
//! machines. The assistant is constructed once at startup and handed to the
//! coordinator by reference — there is no lazily-built singleton.

use crate::config::Settings;
use crate::ports::llm_gateway::{ChatRequest, LlmGateway};
use crate::ports::settings_store::{SettingsError, SettingsStore};
use sidelens_domain::{clip_chars, clip_chars_silent, AssistError, Language, PromptTemplate};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Translate input is clipped to this many chars (plus a marker).
pub const TRANSLATE_INPUT_LIMIT: usize = 5000;
/// Summarize input is clipped to this many chars, silently.
pub const SUMMARY_INPUT_LIMIT: usize = 8000;
/// Page text shorter than this cannot produce a meaningful summary.
pub const SUMMARY_MIN_CHARS: usize = 100;
/// Above this input size the summary gets the larger token budget.
const SUMMARY_LARGE_INPUT: usize = 10000;

const TRANSLATE_TEMPERATURE: f32 = 0.3;
const SUMMARY_TEMPERATURE: f32 = 0.2;
const TRANSLATE_MAX_TOKENS: u32 = 2000;
const SUMMARY_MAX_TOKENS: u32 = 1500;
const SUMMARY_MAX_TOKENS_LARGE: u32 = 2000;

/// Assistant service wrapping the completion endpoint.
///
/// Holds the in-memory API key; [`set_api_key`](Assistant::set_api_key)
/// writes through to the settings store so the key survives restarts.
pub struct Assistant {
    gateway: Arc<dyn LlmGateway>,
    settings: Arc<dyn SettingsStore>,
    api_key: RwLock<Option<String>>,
}

impl Assistant {
    pub fn new(gateway: Arc<dyn LlmGateway>, settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            gateway,
            settings,
            api_key: RwLock::new(None),
        }
    }

    /// Seed the in-memory key from persisted settings.
    ///
    /// Returns whether a key is now available.
    pub async fn init(&self) -> Result<bool, SettingsError> {
        let settings = self.settings.load().await?;
        let key = settings
            .kimi_api_key
            .filter(|k| !k.trim().is_empty());
        let present = key.is_some();
        *self.api_key.write().await = key;
        debug!(api_key_present = present, "assistant initialized");
        Ok(present)
    }

    pub async fn has_api_key(&self) -> bool {
        self.api_key.read().await.is_some()
    }

    /// Store the key in memory and persist it. An empty key unsets it.
    ///
    /// No format validation happens here; a bad key surfaces as an auth
    /// failure on the next call.
    pub async fn set_api_key(&self, key: &str) -> Result<(), SettingsError> {
        let trimmed = key.trim();
        let value = (!trimmed.is_empty()).then(|| trimmed.to_string());
        *self.api_key.write().await = value.clone();

        let mut settings = match self.settings.load().await {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "settings unreadable, rewriting from defaults");
                Settings::default()
            }
        };
        settings.kimi_api_key = value;
        self.settings.save(&settings).await
    }

    /// The configured default target language.
    pub async fn default_language(&self) -> Language {
        match self.settings.load().await {
            Ok(settings) => settings.language(),
            Err(e) => {
                warn!(error = %e, "failed to load settings, using default language");
                Language::default()
            }
        }
    }

    /// Persist a new default target language.
    pub async fn set_default_language(&self, language: Language) -> Result<(), SettingsError> {
        let mut settings = self.settings.load().await.unwrap_or_default();
        settings.target_language = language.code().to_string();
        self.settings.save(&settings).await
    }

    /// Translate `text` into `language`.
    ///
    /// Fails with [`AssistError::EmptyInput`] before any transport work when
    /// the trimmed text is empty, and with [`AssistError::MissingApiKey`]
    /// when no key is configured. Input beyond
    /// [`TRANSLATE_INPUT_LIMIT`] chars is clipped with a marker.
    pub async fn translate(&self, text: &str, language: Language) -> Result<String, AssistError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AssistError::EmptyInput);
        }
        let key = self.current_key().await?;

        let clipped = clip_chars(text, TRANSLATE_INPUT_LIMIT);
        debug!(
            chars = clipped.chars().count(),
            language = %language,
            "sending translate request"
        );
        let request = ChatRequest::new(PromptTemplate::translate(&clipped, language))
            .with_temperature(TRANSLATE_TEMPERATURE)
            .with_max_tokens(TRANSLATE_MAX_TOKENS);
        self.gateway.complete(&key, request).await
    }

    /// Summarize page content.
    ///
    /// Requires at least [`SUMMARY_MIN_CHARS`] chars of trimmed content;
    /// clips to [`SUMMARY_INPUT_LIMIT`] chars before sending and picks the
    /// larger output budget for very long pages.
    pub async fn summarize(&self, content: &str) -> Result<String, AssistError> {
        let content = content.trim();
        let chars = content.chars().count();
        if chars < SUMMARY_MIN_CHARS {
            return Err(AssistError::InsufficientContent { chars });
        }
        let key = self.current_key().await?;

        let max_tokens = if chars > SUMMARY_LARGE_INPUT {
            SUMMARY_MAX_TOKENS_LARGE
        } else {
            SUMMARY_MAX_TOKENS
        };
        let clipped = clip_chars_silent(content, SUMMARY_INPUT_LIMIT);
        debug!(chars, max_tokens, "sending summarize request");
        let request = ChatRequest::new(PromptTemplate::summarize(&clipped))
            .with_temperature(SUMMARY_TEMPERATURE)
            .with_max_tokens(max_tokens);
        self.gateway.complete(&key, request).await
    }

    /// Probe the endpoint with the fixed acknowledgment prompt.
    ///
    /// `Ok(false)` means the endpoint answered but not with the expected
    /// acknowledgment; transport and auth failures propagate as errors.
    pub async fn test_connection(&self) -> Result<bool, AssistError> {
        let key = self.current_key().await?;
        let request = ChatRequest::new(PromptTemplate::connection_probe());
        let reply = self.gateway.complete(&key, request).await?;
        Ok(PromptTemplate::is_probe_ack(&reply))
    }

    async fn current_key(&self) -> Result<String, AssistError> {
        self.api_key
            .read()
            .await
            .clone()
            .ok_or(AssistError::MissingApiKey)
    }
}
