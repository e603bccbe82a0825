//! Wire types for the chat-completions endpoint.

use serde::{Deserialize, Serialize};
use sidelens_domain::ChatMessage;

/// Request body for `POST /chat/completions`.
///
/// `stream` is always `false`; sidelens never consumes deltas.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

/// Success response body. Only `choices[0].message.content` matters.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: String,
}

impl ChatCompletionResponse {
    /// Extract the trimmed assistant text, or `None` when the body is
    /// missing `choices[0].message`.
    pub fn into_content(self) -> Option<String> {
        let choice = self.choices.into_iter().next()?;
        let message = choice.message?;
        Some(message.content.trim().to_string())
    }
}

/// Best-effort error body: `{"error": {"message": …}}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sidelens_domain::ChatMessage;

    #[test]
    fn request_body_matches_the_endpoint_contract() {
        let request = ChatCompletionRequest {
            model: "moonshot-v1-8k".into(),
            messages: vec![ChatMessage::user("hi")],
            // exactly representable, so the JSON comparison is stable
            temperature: 0.25,
            max_tokens: 2000,
            stream: false,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "moonshot-v1-8k",
                "messages": [{"role": "user", "content": "hi"}],
                "temperature": 0.25,
                "max_tokens": 2000,
                "stream": false
            })
        );
    }

    #[test]
    fn content_is_extracted_and_trimmed() {
        let body: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": "  你好，世界  "}}]
        }))
        .unwrap();
        assert_eq!(body.into_content().unwrap(), "你好，世界");
    }

    #[test]
    fn empty_choices_is_malformed() {
        let body: ChatCompletionResponse =
            serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(body.into_content().is_none());
    }

    #[test]
    fn missing_message_is_malformed() {
        let body: ChatCompletionResponse =
            serde_json::from_value(json!({"choices": [{"message": null}]})).unwrap();
        assert!(body.into_content().is_none());

        let body: ChatCompletionResponse = serde_json::from_value(json!({})).unwrap();
        assert!(body.into_content().is_none());
    }

    #[test]
    fn error_body_message_is_best_effort() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"error": {"message": "invalid api key", "type": "auth_error"}}"#,
        )
        .unwrap();
        assert_eq!(body.error.unwrap().message, "invalid api key");

        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.error.is_none());
    }
}
