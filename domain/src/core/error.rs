//! Domain error types

use thiserror::Error;

/// Errors raised anywhere between the message boundary and the LLM endpoint.
///
/// Every variant is caught at the coordinator's dispatch boundary and
/// converted to a `{success: false, error}` reply — none of these crosses
/// a context boundary as a panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssistError {
    #[error("API key is not configured; set one before making requests")]
    MissingApiKey,

    #[error("no selected text to translate")]
    EmptyInput,

    #[error("page content is too short to summarize ({chars} chars, need at least 100)")]
    InsufficientContent { chars: usize },

    /// Transport failure (`status: None`), non-2xx response, or a 2xx body
    /// missing `choices[0].message`.
    #[error("API request failed{}: {message}", fmt_status(.status))]
    Api { status: Option<u16>, message: String },

    #[error("unrecognized action: {0}")]
    UnknownAction(String),

    #[error("unable to get page content: {0}")]
    PageUnavailable(String),

    #[error("unable to open side panel: {0}")]
    PanelUnavailable(String),
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(s) => format!(" ({s})"),
        None => String::new(),
    }
}

impl AssistError {
    /// HTTP status attached to an API failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AssistError::Api { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_status() {
        let err = AssistError::Api {
            status: Some(401),
            message: "invalid api key".into(),
        };
        assert_eq!(err.to_string(), "API request failed (401): invalid api key");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn transport_error_display_has_no_status() {
        let err = AssistError::Api {
            status: None,
            message: "connection refused".into(),
        };
        assert_eq!(err.to_string(), "API request failed: connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn unknown_action_names_the_tag() {
        let err = AssistError::UnknownAction("frobnicate".into());
        assert_eq!(err.to_string(), "unrecognized action: frobnicate");
    }
}
