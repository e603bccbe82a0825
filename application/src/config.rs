//! Persisted user settings.
//!
//! A flat key/value map with per-field defaults. Keys keep their original
//! camelCase storage names so existing settings files stay readable; any
//! key missing from the store falls back to its default on load (no schema
//! versioning, no migration).

use serde::{Deserialize, Serialize};
use sidelens_domain::Language;

/// All persisted configuration, merged with defaults on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// API key for the completion endpoint. Absent means unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kimi_api_key: Option<String>,
    /// Default translation target, as a two-letter code.
    pub target_language: String,
    pub auto_detect_language: bool,
    pub show_original_text: bool,
    pub summary_length: String,
    pub include_key_points: bool,
    pub auto_open_sidepanel: bool,
    pub show_floating_button: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            kimi_api_key: None,
            target_language: "zh".to_string(),
            auto_detect_language: true,
            show_original_text: true,
            summary_length: "medium".to_string(),
            include_key_points: true,
            auto_open_sidepanel: true,
            show_floating_button: true,
        }
    }
}

impl Settings {
    /// The camelCase storage names, in declaration order. Stores that read
    /// from case-insensitive sources (environment variables) map their keys
    /// onto these.
    pub const KEYS: [&'static str; 8] = [
        "kimiApiKey",
        "targetLanguage",
        "autoDetectLanguage",
        "showOriginalText",
        "summaryLength",
        "includeKeyPoints",
        "autoOpenSidepanel",
        "showFloatingButton",
    ];

    /// The default target language, resolved through the fixed code table.
    pub fn language(&self) -> Language {
        Language::from_code(&self.target_language)
    }
}
