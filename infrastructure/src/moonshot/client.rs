//! HTTP gateway to the Moonshot completion endpoint.

use super::protocol::{ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse};
use async_trait::async_trait;
use sidelens_application::ports::llm_gateway::{ChatRequest, LlmGateway};
use sidelens_domain::AssistError;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.moonshot.cn/v1";
const DEFAULT_MODEL: &str = "moonshot-v1-8k";

/// The underlying transport configures no timeout of its own, so an
/// explicit ceiling keeps a dead endpoint from hanging a request forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How much of an unparseable error body to carry into the error message.
const ERROR_SNIPPET_CHARS: usize = 200;

/// `reqwest`-backed [`LlmGateway`] for the Moonshot chat-completions API.
pub struct MoonshotGateway {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl MoonshotGateway {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Point the gateway at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmGateway for MoonshotGateway {
    async fn complete(&self, api_key: &str, request: ChatRequest) -> Result<String, AssistError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        };

        debug!(model = %self.model, max_tokens = body.max_tokens, "calling completion endpoint");
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistError::Api {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| AssistError::Api {
            status: Some(status.as_u16()),
            message: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            let err = error_from_response(status.as_u16(), status.canonical_reason(), &text);
            warn!(status = status.as_u16(), "completion request failed");
            return Err(err);
        }

        parse_success_body(status.as_u16(), &text)
    }
}

/// Map a non-2xx response to an [`AssistError::Api`] carrying the status
/// and the best message the body offers.
fn error_from_response(status: u16, reason: Option<&str>, body: &str) -> AssistError {
    let from_body = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(|e| e.message)
        .filter(|m| !m.is_empty());

    let message = from_body.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            reason.unwrap_or("unknown error").to_string()
        } else {
            trimmed.chars().take(ERROR_SNIPPET_CHARS).collect()
        }
    });

    AssistError::Api {
        status: Some(status),
        message,
    }
}

/// Extract `choices[0].message.content` from a 2xx body.
fn parse_success_body(status: u16, body: &str) -> Result<String, AssistError> {
    let parsed: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| AssistError::Api {
            status: Some(status),
            message: format!("API response could not be parsed: {e}"),
        })?;
    parsed.into_content().ok_or(AssistError::Api {
        status: Some(status),
        message: "API response is missing choices[0].message".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_error_body_yields_its_message() {
        let err = error_from_response(
            401,
            Some("Unauthorized"),
            r#"{"error": {"message": "invalid api key"}}"#,
        );
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("invalid api key"));
    }

    #[test]
    fn unparseable_error_body_still_carries_the_status() {
        let err = error_from_response(502, Some("Bad Gateway"), "<html>upstream died</html>");
        assert_eq!(err.status(), Some(502));
        assert!(err.to_string().contains("(502)"));
    }

    #[test]
    fn empty_error_body_falls_back_to_the_status_reason() {
        let err = error_from_response(503, Some("Service Unavailable"), "");
        assert_eq!(err.status(), Some(503));
        assert!(err.to_string().contains("Service Unavailable"));
    }

    #[test]
    fn success_body_yields_trimmed_content() {
        let body = r#"{"choices": [{"message": {"content": " 你好，世界 "}}]}"#;
        assert_eq!(parse_success_body(200, body).unwrap(), "你好，世界");
    }

    #[test]
    fn malformed_success_body_is_an_api_error() {
        let err = parse_success_body(200, r#"{"choices": []}"#).unwrap_err();
        assert_eq!(err.status(), Some(200));
        assert!(err.to_string().contains("choices[0].message"));

        let err = parse_success_body(200, "not json").unwrap_err();
        assert_eq!(err.status(), Some(200));
    }

    #[test]
    fn endpoint_handles_trailing_slashes() {
        let gateway = MoonshotGateway::new()
            .unwrap()
            .with_base_url("https://example.test/v1/");
        assert_eq!(gateway.endpoint(), "https://example.test/v1/chat/completions");
    }
}
