//! Target languages supported by the translate prompt.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A translation target language.
///
/// The set is closed: these are the only languages the translate prompt
/// knows how to name. Unrecognized codes fall back to [`Language::Zh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    En,
    Ja,
    Ko,
    Fr,
    De,
    Es,
}

impl Language {
    /// All supported languages, in display order.
    pub const ALL: [Language; 7] = [
        Language::Zh,
        Language::En,
        Language::Ja,
        Language::Ko,
        Language::Fr,
        Language::De,
        Language::Es,
    ];

    /// Resolve a two-letter code. Total: anything unrecognized maps to `Zh`.
    pub fn from_code(code: &str) -> Language {
        match code {
            "zh" => Language::Zh,
            "en" => Language::En,
            "ja" => Language::Ja,
            "ko" => Language::Ko,
            "fr" => Language::Fr,
            "de" => Language::De,
            "es" => Language::Es,
            _ => Language::Zh,
        }
    }

    /// The two-letter code used on the wire and in settings.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Es => "es",
        }
    }

    /// The name used inside the translate prompt.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::Zh => "中文",
            Language::En => "English",
            Language::Ja => "日语",
            Language::Ko => "韩语",
            Language::Fr => "法语",
            Language::De => "德语",
            Language::Es => "西班牙语",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Zh
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Language::from_code(s))
    }
}
