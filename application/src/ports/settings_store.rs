//! Settings store port

use crate::config::Settings;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from the persisted settings store.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings could not be parsed: {0}")]
    Parse(String),
}

/// Persistent key/value storage for [`Settings`].
///
/// `load` always succeeds in producing a full `Settings` when the backing
/// data is readable — missing keys merge with defaults.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<Settings, SettingsError>;
    async fn save(&self, settings: &Settings) -> Result<(), SettingsError>;
}
