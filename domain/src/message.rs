//! The inter-context message contract.
//!
//! This is the de-facto wire protocol between the page agent, the
//! coordinator, and the panel. Requests carry an `action` tag from a closed
//! set; replies are one of the fixed response shapes. The JSON layout is
//! load-bearing — other processes speaking this contract depend on it — so
//! every shape is pinned by the serde attributes and the tests below.

use crate::core::error::AssistError;
use serde::{Deserialize, Serialize};

/// A typed action request addressed to the coordinator.
///
/// Payload fields default when absent so that a frame with a known action
/// tag always parses; only an unknown tag is rejected (and answered with an
/// error reply, never dropped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Request {
    /// Open the panel for the current tab (user gesture on the trigger).
    TogglePanel,
    /// The page agent observed a new non-empty selection.
    TextSelected {
        #[serde(default)]
        text: String,
    },
    /// Translate `text` (or the current selection when absent) into
    /// `target_language` (or the configured default when absent).
    Translate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(
            default,
            rename = "targetLanguage",
            skip_serializing_if = "Option::is_none"
        )]
        target_language: Option<String>,
    },
    /// Summarize the current page; the coordinator fetches the content.
    Summarize,
    /// Read the current selection register.
    GetSelectedText,
    /// Read the current page's visible text.
    GetPageContent,
    /// Probe the completion endpoint.
    TestConnection,
    /// Store a new API key in memory and settings.
    SetApiKey {
        #[serde(default, rename = "apiKey")]
        api_key: String,
    },
}

/// The set of recognized action tags, in contract order.
pub const ACTIONS: [&str; 8] = [
    "toggle-panel",
    "text-selected",
    "translate",
    "summarize",
    "get-selected-text",
    "get-page-content",
    "test-connection",
    "set-api-key",
];

impl Request {
    /// Parse a raw frame.
    ///
    /// A frame whose `action` tag is outside the contract yields
    /// [`AssistError::UnknownAction`] carrying the offending tag; a frame
    /// with no `action` at all yields the same error with `"<none>"`.
    pub fn from_value(value: serde_json::Value) -> Result<Request, AssistError> {
        let tag = value
            .get("action")
            .and_then(|a| a.as_str())
            .map(str::to_string);
        match tag {
            Some(tag) if ACTIONS.contains(&tag.as_str()) => serde_json::from_value(value)
                .map_err(|e| AssistError::UnknownAction(format!("{tag}: {e}"))),
            Some(tag) => Err(AssistError::UnknownAction(tag)),
            None => Err(AssistError::UnknownAction("<none>".to_string())),
        }
    }

    /// The action tag this request serializes under.
    pub fn action(&self) -> &'static str {
        match self {
            Request::TogglePanel => "toggle-panel",
            Request::TextSelected { .. } => "text-selected",
            Request::Translate { .. } => "translate",
            Request::Summarize => "summarize",
            Request::GetSelectedText => "get-selected-text",
            Request::GetPageContent => "get-page-content",
            Request::TestConnection => "test-connection",
            Request::SetApiKey { .. } => "set-api-key",
        }
    }
}

/// A coordinator reply, one of the contract's fixed response shapes.
///
/// Serialized untagged; the constructors keep the `success` discriminant
/// consistent with the variant, so always build replies through them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    /// `{"success": true, "result": …}`
    Result { success: bool, result: String },
    /// `{"success": false, "error": …}`
    Failed { success: bool, error: String },
    /// `{"success": true}`
    Done { success: bool },
    /// `{"connected": …}`
    Connected { connected: bool },
    /// `{"text": …}`
    Text { text: String },
    /// `{"content": …}`
    Content { content: String },
}

impl Reply {
    pub fn result(result: impl Into<String>) -> Reply {
        Reply::Result {
            success: true,
            result: result.into(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Reply {
        Reply::Failed {
            success: false,
            error: error.into(),
        }
    }

    pub fn done() -> Reply {
        Reply::Done { success: true }
    }

    pub fn connected(connected: bool) -> Reply {
        Reply::Connected { connected }
    }

    pub fn text(text: impl Into<String>) -> Reply {
        Reply::Text { text: text.into() }
    }

    pub fn content(content: impl Into<String>) -> Reply {
        Reply::Content {
            content: content.into(),
        }
    }

    /// Whether this reply reports a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Failed { .. })
    }

    /// The error message, if this is a failure reply.
    pub fn error(&self) -> Option<&str> {
        match self {
            Reply::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<AssistError> for Reply {
    fn from(err: AssistError) -> Reply {
        Reply::failed(err.to_string())
    }
}

/// Notifications pushed from the coordinator to attached panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// The selection register changed; panels refresh their preview.
    SelectionChanged(String),
    /// A user gesture asked for the panel to be shown.
    OpenRequested,
}

/// External notifications from the hosting environment into the
/// coordinator. Both clear the selection register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    TabActivated,
    PageLoadComplete,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requests_serialize_with_kebab_case_action_tags() {
        let req = Request::Translate {
            text: Some("hello".into()),
            target_language: Some("ja".into()),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({"action": "translate", "text": "hello", "targetLanguage": "ja"})
        );

        let req = Request::SetApiKey {
            api_key: "sk-123".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, json!({"action": "set-api-key", "apiKey": "sk-123"}));
    }

    #[test]
    fn action_tags_match_the_contract_set() {
        let all = [
            Request::TogglePanel,
            Request::TextSelected { text: String::new() },
            Request::Translate {
                text: None,
                target_language: None,
            },
            Request::Summarize,
            Request::GetSelectedText,
            Request::GetPageContent,
            Request::TestConnection,
            Request::SetApiKey {
                api_key: String::new(),
            },
        ];
        for (req, tag) in all.iter().zip(ACTIONS) {
            assert_eq!(req.action(), tag);
            let value = serde_json::to_value(req).unwrap();
            assert_eq!(value["action"], tag);
        }
    }

    #[test]
    fn translate_payload_fields_are_optional() {
        let req = Request::from_value(json!({"action": "translate"})).unwrap();
        assert_eq!(
            req,
            Request::Translate {
                text: None,
                target_language: None,
            }
        );
    }

    #[test]
    fn unknown_action_is_rejected_with_the_tag() {
        let err = Request::from_value(json!({"action": "frobnicate"})).unwrap_err();
        assert_eq!(err, AssistError::UnknownAction("frobnicate".into()));
    }

    #[test]
    fn missing_action_is_rejected() {
        let err = Request::from_value(json!({"text": "orphan"})).unwrap_err();
        assert_eq!(err, AssistError::UnknownAction("<none>".into()));
    }

    #[test]
    fn reply_shapes_match_the_contract() {
        assert_eq!(
            serde_json::to_value(Reply::result("ok")).unwrap(),
            json!({"success": true, "result": "ok"})
        );
        assert_eq!(
            serde_json::to_value(Reply::failed("boom")).unwrap(),
            json!({"success": false, "error": "boom"})
        );
        assert_eq!(
            serde_json::to_value(Reply::done()).unwrap(),
            json!({"success": true})
        );
        assert_eq!(
            serde_json::to_value(Reply::connected(false)).unwrap(),
            json!({"connected": false})
        );
        assert_eq!(
            serde_json::to_value(Reply::text("sel")).unwrap(),
            json!({"text": "sel"})
        );
        assert_eq!(
            serde_json::to_value(Reply::content("body")).unwrap(),
            json!({"content": "body"})
        );
    }

    #[test]
    fn reply_shapes_round_trip() {
        for reply in [
            Reply::result("ok"),
            Reply::failed("boom"),
            Reply::done(),
            Reply::connected(true),
            Reply::text("sel"),
            Reply::content("body"),
        ] {
            let value = serde_json::to_value(&reply).unwrap();
            let back: Reply = serde_json::from_value(value).unwrap();
            assert_eq!(back, reply);
        }
    }

    #[test]
    fn error_reply_carries_the_domain_message() {
        let reply: Reply = AssistError::EmptyInput.into();
        assert!(reply.is_error());
        assert_eq!(reply.error(), Some("no selected text to translate"));
    }
}
