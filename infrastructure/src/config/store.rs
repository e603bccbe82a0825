//! TOML-backed settings store.

use async_trait::async_trait;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use sidelens_application::config::Settings;
use sidelens_application::ports::settings_store::{SettingsError, SettingsStore};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment prefix for settings overrides.
///
/// The namespace is shared with the gateway overrides (`SIDELENS_BASE_URL`,
/// `SIDELENS_MODEL`); variables that map to no settings key are ignored on
/// extraction.
const ENV_PREFIX: &str = "SIDELENS_";

/// Flat key/value settings persisted as TOML.
///
/// Load merges the file over built-in defaults, so a partial or missing
/// file always yields a complete [`Settings`]. Save rewrites the whole
/// file; there is no schema versioning.
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location:
    /// `<config_dir>/sidelens/settings.toml`.
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|d| Self::new(d.join("sidelens").join("settings.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn load(&self) -> Result<Settings, SettingsError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));
        if self.path.exists() {
            figment = figment.merge(Toml::file(&self.path));
        }
        // Environment wins over the file. Env keys arrive lowercased, so
        // map them back onto the camelCase storage names.
        figment = figment.merge(Env::prefixed(ENV_PREFIX).map(|key| {
            Settings::KEYS
                .iter()
                .find(|name| key.as_str().eq_ignore_ascii_case(name))
                .map(|name| (*name).into())
                .unwrap_or_else(|| key.as_str().to_owned().into())
        })
        // `map` resets the provider's lowercasing flag, so disable it
        // after chaining or the mapped camelCase keys get re-lowercased
        // and never match the storage names.
        .lowercase(false));
        let settings = figment
            .extract()
            .map_err(|e| SettingsError::Parse(e.to_string()))?;
        debug!(path = %self.path.display(), "settings loaded");
        Ok(settings)
    }

    async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let body =
            toml::to_string_pretty(settings).map_err(|e| SettingsError::Parse(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, body).await?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
