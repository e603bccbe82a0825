//! Panel state and action guards.
//!
//! The controller mirrors what the original side panel kept in its DOM:
//! the cached selection, the chosen target language, the connection
//! indicator, and one busy flag per action. The busy flags are a UI-level
//! guard only — the coordinator stays permissive — and they are
//! independent, so a translate and a summarize may be in flight at the
//! same time while a second translate is suppressed.

use sidelens_application::ports::settings_store::SettingsStore;
use sidelens_application::CoordinatorHandle;
use sidelens_domain::{Language, PanelEvent, Reply, Request};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::warn;

#[derive(Default)]
struct PanelState {
    selection: Mutex<String>,
    language: Mutex<Language>,
    connected: AtomicBool,
    translating: AtomicBool,
    summarizing: AtomicBool,
}

/// Controller for one attached panel.
pub struct PanelController {
    handle: CoordinatorHandle,
    settings: Arc<dyn SettingsStore>,
    state: Arc<PanelState>,
}

impl PanelController {
    pub fn new(handle: CoordinatorHandle, settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            handle,
            settings,
            state: Arc::new(PanelState::default()),
        }
    }

    /// Panel-load sequence: fetch the current selection, the configured
    /// target language, and refresh the connection indicator once.
    pub async fn startup(&self) {
        if let Reply::Text { text } = self.handle.request(Request::GetSelectedText).await {
            *self.state.selection.lock().unwrap() = text;
        }

        match self.settings.load().await {
            Ok(settings) => *self.state.language.lock().unwrap() = settings.language(),
            Err(e) => warn!(error = %e, "could not load panel settings"),
        }

        if let Reply::Connected { connected } = self.handle.request(Request::TestConnection).await
        {
            self.state.connected.store(connected, Ordering::SeqCst);
        }
    }

    /// Start a translate request for the cached selection.
    ///
    /// Returns `None` when the action is disabled (no selection) or
    /// already running; the suppressed call issues no request at all.
    pub fn begin_translate(&self) -> Option<JoinHandle<Reply>> {
        let text = self.state.selection.lock().unwrap().clone();
        if text.is_empty() {
            return None;
        }
        if self.state.translating.swap(true, Ordering::SeqCst) {
            return None;
        }

        let handle = self.handle.clone();
        let state = Arc::clone(&self.state);
        let language = *state.language.lock().unwrap();
        Some(tokio::spawn(async move {
            let reply = handle
                .request(Request::Translate {
                    text: Some(text),
                    target_language: Some(language.code().to_string()),
                })
                .await;
            state.translating.store(false, Ordering::SeqCst);
            reply
        }))
    }

    /// Start a summarize request for the current page.
    pub fn begin_summarize(&self) -> Option<JoinHandle<Reply>> {
        if self.state.summarizing.swap(true, Ordering::SeqCst) {
            return None;
        }
        let handle = self.handle.clone();
        let state = Arc::clone(&self.state);
        Some(tokio::spawn(async move {
            let reply = handle.request(Request::Summarize).await;
            state.summarizing.store(false, Ordering::SeqCst);
            reply
        }))
    }

    /// Change the target language and persist the new default immediately.
    pub async fn set_language(&self, code: &str) -> Language {
        let language = Language::from_code(code);
        *self.state.language.lock().unwrap() = language;

        let mut settings = self.settings.load().await.unwrap_or_default();
        settings.target_language = language.code().to_string();
        if let Err(e) = self.settings.save(&settings).await {
            warn!(error = %e, "could not persist target language");
        }
        language
    }

    /// Push a manual selection through the coordinator, as the page agent
    /// would, and cache it locally.
    pub async fn set_selection_via(&self, text: &str) -> Reply {
        let reply = self
            .handle
            .request(Request::TextSelected {
                text: text.to_string(),
            })
            .await;
        if !reply.is_error() {
            *self.state.selection.lock().unwrap() = text.trim().to_string();
        }
        reply
    }

    /// Store a new API key through the coordinator.
    pub async fn set_api_key(&self, key: &str) -> Reply {
        self.handle
            .request(Request::SetApiKey {
                api_key: key.to_string(),
            })
            .await
    }

    /// Apply a pushed panel notification.
    pub fn apply_event(&self, event: &PanelEvent) {
        if let PanelEvent::SelectionChanged(text) = event {
            *self.state.selection.lock().unwrap() = text.clone();
        }
    }

    pub fn selection(&self) -> String {
        self.state.selection.lock().unwrap().clone()
    }

    /// Whether the translate action is currently enabled.
    pub fn can_translate(&self) -> bool {
        !self.state.selection.lock().unwrap().is_empty()
    }

    pub fn language(&self) -> Language {
        *self.state.language.lock().unwrap()
    }

    pub fn is_connected(&self) -> bool {
        self.state.connected.load(Ordering::SeqCst)
    }

    pub fn is_translating(&self) -> bool {
        self.state.translating.load(Ordering::SeqCst)
    }

    pub fn is_summarizing(&self) -> bool {
        self.state.summarizing.load(Ordering::SeqCst)
    }
}
