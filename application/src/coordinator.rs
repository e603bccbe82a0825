//! The coordinator: single addressable point routing action requests.
//!
//! The page agent and the panel never talk to each other or to the gateway
//! directly — every action request lands here, gets dispatched, and comes
//! back as one of the contract's reply shapes. No error crosses this
//! boundary as a panic: dispatch failures are caught and folded into
//! `{success: false, error}` replies, and unknown action tags are answered,
//! never dropped.
//!
//! The run loop mirrors a message-broker reader task: a single `mpsc`
//! channel carries both requests (with `oneshot` reply correlation) and
//! host events, preserving per-channel FIFO receipt. Each request is then
//! handled on its own task, so a slow translate does not block a
//! `toggle-panel` — the same cooperative model the original contexts had.

use crate::ports::page_host::PageHost;
use crate::use_cases::assistant::Assistant;
use sidelens_domain::{AssistError, HostEvent, Language, PanelEvent, Reply, Request, Selection};
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Capacity of the panel-event broadcast channel.
const PANEL_EVENT_CAPACITY: usize = 16;
/// Capacity of the inbound request channel.
const INBOUND_CAPACITY: usize = 32;

/// A request paired with its reply slot.
pub struct Envelope {
    pub request: Request,
    pub reply: oneshot::Sender<Reply>,
}

enum Inbound {
    Request(Envelope),
    Host(HostEvent),
}

/// Cloneable handle for addressing a spawned [`Coordinator`].
#[derive(Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::Sender<Inbound>,
}

impl CoordinatorHandle {
    /// Send a request and wait for its reply.
    ///
    /// A torn-down coordinator yields a failure reply rather than an error:
    /// callers of the contract only ever see reply shapes.
    pub async fn request(&self, request: Request) -> Reply {
        let (tx, rx) = oneshot::channel();
        let envelope = Envelope { request, reply: tx };
        if self.tx.send(Inbound::Request(envelope)).await.is_err() {
            return Reply::failed("coordinator is not running");
        }
        rx.await
            .unwrap_or_else(|_| Reply::failed("coordinator dropped the request"))
    }

    /// Forward an external host notification (fire and forget).
    pub async fn notify(&self, event: HostEvent) {
        let _ = self.tx.send(Inbound::Host(event)).await;
    }
}

/// The message router owning the selection register.
pub struct Coordinator {
    assistant: Arc<Assistant>,
    selection: Mutex<Selection>,
    page: Option<Arc<dyn PageHost>>,
    events: broadcast::Sender<PanelEvent>,
}

impl Coordinator {
    pub fn new(assistant: Arc<Assistant>) -> Self {
        let (events, _) = broadcast::channel(PANEL_EVENT_CAPACITY);
        Self {
            assistant,
            selection: Mutex::new(Selection::new()),
            page: None,
            events,
        }
    }

    /// Attach the page host used for `summarize` and `get-page-content`.
    pub fn with_page_host(mut self, page: Arc<dyn PageHost>) -> Self {
        self.page = Some(page);
        self
    }

    /// Subscribe to panel notifications (selection updates, open requests).
    pub fn subscribe(&self) -> broadcast::Receiver<PanelEvent> {
        self.events.subscribe()
    }

    /// The current selection register value.
    pub fn selected_text(&self) -> String {
        self.selection.lock().unwrap().text().to_string()
    }

    /// Handle one request, converting every failure into an error reply.
    pub async fn handle(self: &Arc<Self>, request: Request) -> Reply {
        let action = request.action();
        match self.dispatch(request).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(action, error = %err, "request failed");
                err.into()
            }
        }
    }

    /// Handle a raw JSON frame, answering unknown actions with an error
    /// reply instead of dropping them.
    pub async fn handle_frame(self: &Arc<Self>, frame: serde_json::Value) -> Reply {
        match Request::from_value(frame) {
            Ok(request) => self.handle(request).await,
            Err(err) => {
                warn!(error = %err, "unparseable frame");
                err.into()
            }
        }
    }

    /// External host notifications. Both reset the selection register.
    pub fn handle_event(&self, event: HostEvent) {
        debug!(?event, "host event, clearing selection");
        self.selection.lock().unwrap().clear();
    }

    async fn dispatch(self: &Arc<Self>, request: Request) -> Result<Reply, AssistError> {
        debug!(action = request.action(), "dispatching");
        match request {
            Request::TogglePanel => {
                self.events
                    .send(PanelEvent::OpenRequested)
                    .map_err(|_| AssistError::PanelUnavailable("no panel attached".into()))?;
                Ok(Reply::done())
            }

            Request::TextSelected { text } => {
                let stored = {
                    let mut selection = self.selection.lock().unwrap();
                    selection.set(&text);
                    selection.text().to_string()
                };
                // Best effort: a closed panel just misses the update.
                if self
                    .events
                    .send(PanelEvent::SelectionChanged(stored))
                    .is_err()
                {
                    debug!("no panel attached, skipping selection notification");
                }
                Ok(Reply::done())
            }

            Request::Translate {
                text,
                target_language,
            } => {
                let text = match text {
                    Some(t) if !t.trim().is_empty() => t,
                    _ => self.selected_text(),
                };
                let language = match target_language {
                    Some(code) => Language::from_code(&code),
                    None => self.assistant.default_language().await,
                };
                let translation = self.assistant.translate(&text, language).await?;
                Ok(Reply::result(translation))
            }

            Request::Summarize => {
                let content = self.page_content().await?;
                let summary = self.assistant.summarize(&content).await?;
                Ok(Reply::result(summary))
            }

            Request::GetSelectedText => Ok(Reply::text(self.selected_text())),

            Request::GetPageContent => {
                let content = self.page_content().await?;
                Ok(Reply::content(content))
            }

            Request::TestConnection => match self.assistant.test_connection().await {
                Ok(connected) => Ok(Reply::connected(connected)),
                Err(err) => {
                    // The panel's indicator treats any failure as offline.
                    warn!(error = %err, "connection test failed");
                    Ok(Reply::connected(false))
                }
            },

            Request::SetApiKey { api_key } => match self.assistant.set_api_key(&api_key).await {
                Ok(()) => Ok(Reply::done()),
                Err(err) => Ok(Reply::failed(format!("failed to persist API key: {err}"))),
            },
        }
    }

    async fn page_content(&self) -> Result<String, AssistError> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| AssistError::PageUnavailable("no page attached".into()))?;
        page.page_content().await
    }

    /// Run the coordinator on a background task.
    ///
    /// Requests are received in FIFO order and handled concurrently; the
    /// loop ends when the handle side closes or `cancel` fires.
    pub fn spawn(
        self: Arc<Self>,
        cancel: CancellationToken,
    ) -> (CoordinatorHandle, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel(INBOUND_CAPACITY);
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        debug!("coordinator cancelled");
                        break;
                    }
                    inbound = rx.recv() => match inbound {
                        Some(Inbound::Request(envelope)) => {
                            let this = Arc::clone(&self);
                            tokio::spawn(async move {
                                let reply = this.handle(envelope.request).await;
                                let _ = envelope.reply.send(reply);
                            });
                        }
                        Some(Inbound::Host(event)) => self.handle_event(event),
                        None => {
                            debug!("coordinator channel closed");
                            break;
                        }
                    }
                }
            }
        });
        (CoordinatorHandle { tx }, task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::ports::llm_gateway::{ChatRequest, LlmGateway};
    use crate::ports::settings_store::{SettingsError, SettingsStore};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedGateway {
        reply: String,
        calls: AtomicUsize,
    }

    impl CannedGateway {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl LlmGateway for CannedGateway {
        async fn complete(
            &self,
            _api_key: &str,
            _request: ChatRequest,
        ) -> Result<String, AssistError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }
    }

    struct MemoryStore(Mutex<Settings>);

    impl MemoryStore {
        fn with_key() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Settings {
                kimi_api_key: Some("sk-test".into()),
                ..Settings::default()
            })))
        }
    }

    #[async_trait]
    impl SettingsStore for MemoryStore {
        async fn load(&self) -> Result<Settings, SettingsError> {
            Ok(self.0.lock().unwrap().clone())
        }

        async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
            *self.0.lock().unwrap() = settings.clone();
            Ok(())
        }
    }

    struct StaticPage(String);

    #[async_trait]
    impl PageHost for StaticPage {
        async fn page_content(&self) -> Result<String, AssistError> {
            Ok(self.0.clone())
        }
    }

    async fn coordinator(reply: &str) -> Arc<Coordinator> {
        let assistant = Arc::new(Assistant::new(
            CannedGateway::new(reply),
            MemoryStore::with_key(),
        ));
        assistant.init().await.unwrap();
        Arc::new(Coordinator::new(assistant))
    }

    #[tokio::test]
    async fn selection_lifecycle_set_read_clear() {
        let coord = coordinator("unused").await;

        let reply = coord
            .handle(Request::TextSelected {
                text: "  Hello world  ".into(),
            })
            .await;
        assert_eq!(reply, Reply::done());
        assert_eq!(
            coord.handle(Request::GetSelectedText).await,
            Reply::text("Hello world")
        );

        coord.handle_event(HostEvent::TabActivated);
        assert_eq!(coord.handle(Request::GetSelectedText).await, Reply::text(""));

        coord
            .handle(Request::TextSelected { text: "again".into() })
            .await;
        coord.handle_event(HostEvent::PageLoadComplete);
        assert_eq!(coord.handle(Request::GetSelectedText).await, Reply::text(""));
    }

    #[tokio::test]
    async fn translate_falls_back_to_the_selection_register() {
        let coord = coordinator("你好，世界").await;
        coord
            .handle(Request::TextSelected {
                text: "Hello world".into(),
            })
            .await;

        let reply = coord
            .handle(Request::Translate {
                text: None,
                target_language: Some("zh".into()),
            })
            .await;
        assert_eq!(reply, Reply::result("你好，世界"));
    }

    #[tokio::test]
    async fn translate_with_no_text_anywhere_is_an_error_reply() {
        let coord = coordinator("unused").await;
        let reply = coord
            .handle(Request::Translate {
                text: None,
                target_language: None,
            })
            .await;
        assert_eq!(reply, Reply::failed("no selected text to translate"));
    }

    #[tokio::test]
    async fn summarize_without_a_page_host_reports_page_unavailable() {
        let coord = coordinator("unused").await;
        let reply = coord.handle(Request::Summarize).await;
        assert!(reply.is_error());
        assert!(reply.error().unwrap().contains("page content"));
    }

    #[tokio::test]
    async fn summarize_pulls_content_through_the_page_host() {
        let assistant = Arc::new(Assistant::new(
            CannedGateway::new("a fine summary"),
            MemoryStore::with_key(),
        ));
        assistant.init().await.unwrap();
        let page = Arc::new(StaticPage("p".repeat(500)));
        let coord = Arc::new(Coordinator::new(assistant).with_page_host(page));

        assert_eq!(
            coord.handle(Request::Summarize).await,
            Reply::result("a fine summary")
        );
        assert_eq!(
            coord.handle(Request::GetPageContent).await,
            Reply::content("p".repeat(500))
        );
    }

    #[tokio::test]
    async fn unknown_action_frames_get_an_error_reply() {
        let coord = coordinator("unused").await;
        let reply = coord.handle_frame(json!({"action": "explode"})).await;
        assert_eq!(reply, Reply::failed("unrecognized action: explode"));

        let reply = coord.handle_frame(json!({"no": "action"})).await;
        assert_eq!(reply, Reply::failed("unrecognized action: <none>"));
    }

    #[tokio::test]
    async fn toggle_panel_without_a_panel_is_reported_not_fatal() {
        let coord = coordinator("你好").await;
        let reply = coord.handle(Request::TogglePanel).await;
        assert!(reply.is_error());

        // The failure is scoped to that one request
        coord
            .handle(Request::TextSelected { text: "x".into() })
            .await;
        let reply = coord
            .handle(Request::Translate {
                text: None,
                target_language: None,
            })
            .await;
        assert_eq!(reply, Reply::result("你好"));
    }

    #[tokio::test]
    async fn panel_subscribers_see_selection_updates_and_open_requests() {
        let coord = coordinator("unused").await;
        let mut events = coord.subscribe();

        coord
            .handle(Request::TextSelected {
                text: "picked".into(),
            })
            .await;
        assert_eq!(
            events.recv().await.unwrap(),
            PanelEvent::SelectionChanged("picked".into())
        );

        assert_eq!(coord.handle(Request::TogglePanel).await, Reply::done());
        assert_eq!(events.recv().await.unwrap(), PanelEvent::OpenRequested);
    }

    #[tokio::test]
    async fn probe_failures_surface_as_disconnected() {
        // No API key configured: the probe errors, the reply is connected=false
        let assistant = Arc::new(Assistant::new(
            CannedGateway::new("连接成功"),
            Arc::new(MemoryStore(Mutex::new(Settings::default()))),
        ));
        assistant.init().await.unwrap();
        let coord = Arc::new(Coordinator::new(assistant));
        assert_eq!(
            coord.handle(Request::TestConnection).await,
            Reply::connected(false)
        );
    }

    #[tokio::test]
    async fn spawned_coordinator_answers_over_the_handle() {
        let coord = coordinator("你好，世界").await;
        let cancel = CancellationToken::new();
        let (handle, task) = coord.spawn(cancel.clone());

        let reply = handle
            .request(Request::TextSelected {
                text: "Hello world".into(),
            })
            .await;
        assert_eq!(reply, Reply::done());

        let reply = handle
            .request(Request::Translate {
                text: None,
                target_language: Some("zh".into()),
            })
            .await;
        assert_eq!(reply, Reply::result("你好，世界"));

        handle.notify(HostEvent::TabActivated).await;
        // The host event is processed in FIFO order before this request
        let reply = handle.request(Request::GetSelectedText).await;
        assert_eq!(reply, Reply::text(""));

        cancel.cancel();
        task.await.unwrap();

        let reply = handle.request(Request::GetSelectedText).await;
        assert_eq!(reply, Reply::failed("coordinator is not running"));
    }
}
