//! Page agent: observes user interaction and forwards semantic events.
//!
//! The agent owns the loaded page document and the last selection it saw.
//! It pushes events to the coordinator through a [`CoordinatorHandle`] and
//! passively answers the coordinator's `get-page-content` pulls via the
//! [`PageHost`] port — the same two directions the original content script
//! had.

use super::extract::visible_text;
use async_trait::async_trait;
use sidelens_application::ports::page_host::PageHost;
use sidelens_application::CoordinatorHandle;
use sidelens_domain::{AssistError, Reply, Request};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// Reserved keyboard combinations the agent reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Translate the current selection (originally Ctrl+Shift+T).
    Translate,
    /// Summarize the page (originally Ctrl+Shift+S).
    Summarize,
}

/// In-process page agent.
#[derive(Default)]
pub struct PageAgent {
    html: Mutex<String>,
    selection: Mutex<String>,
    installed: AtomicBool,
}

impl PageAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the trigger control. Idempotent: the first call installs and
    /// returns `true`, every later call is a no-op returning `false`.
    pub fn install(&self) -> bool {
        let first = !self.installed.swap(true, Ordering::SeqCst);
        if first {
            debug!("page agent installed");
        }
        first
    }

    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }

    /// Replace the observed document, as a navigation would.
    pub fn load_page(&self, html: &str) {
        *self.html.lock().unwrap() = html.to_string();
    }

    pub async fn load_page_file(&self, path: &Path) -> std::io::Result<()> {
        let html = tokio::fs::read_to_string(path).await?;
        self.load_page(&html);
        Ok(())
    }

    /// Pointer released over a selection: store it locally and, when
    /// non-empty, forward a `text-selected` event.
    pub async fn on_pointer_release(&self, handle: &CoordinatorHandle, raw_selection: &str) {
        let text = raw_selection.trim();
        if text.is_empty() {
            return;
        }
        *self.selection.lock().unwrap() = text.to_string();
        let reply = handle
            .request(Request::TextSelected {
                text: text.to_string(),
            })
            .await;
        if reply.is_error() {
            debug!(error = ?reply.error(), "selection event not delivered");
        }
    }

    /// A reserved keyboard combination fired.
    ///
    /// Translate with no local selection is a no-op, matching the original
    /// shortcut handler. The reply is returned so callers can surface it.
    pub async fn on_shortcut(
        &self,
        handle: &CoordinatorHandle,
        shortcut: Shortcut,
    ) -> Option<Reply> {
        match shortcut {
            Shortcut::Translate => {
                let text = self.selection.lock().unwrap().clone();
                if text.is_empty() {
                    return None;
                }
                Some(
                    handle
                        .request(Request::Translate {
                            text: Some(text),
                            target_language: None,
                        })
                        .await,
                )
            }
            Shortcut::Summarize => Some(handle.request(Request::Summarize).await),
        }
    }

    /// The floating trigger was activated: ask for the panel.
    pub async fn trigger_activated(&self, handle: &CoordinatorHandle) -> Reply {
        handle.request(Request::TogglePanel).await
    }

    /// Passive handler: the last selection this agent observed.
    pub fn selection(&self) -> String {
        self.selection.lock().unwrap().clone()
    }

    /// Passive handler: the page's visible text.
    pub fn page_text(&self) -> String {
        visible_text(&self.html.lock().unwrap())
    }
}

#[async_trait]
impl PageHost for PageAgent {
    async fn page_content(&self) -> Result<String, AssistError> {
        let text = self.page_text();
        if text.is_empty() {
            return Err(AssistError::PageUnavailable("page has no content".into()));
        }
        Ok(text)
    }
}
