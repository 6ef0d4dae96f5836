//! Chat completion data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use reel_core::{GenerateRequest, Message};
use serde::{Deserialize, Serialize};

/// One message in a chat completion request or response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatMessage {
    /// Wire role name
    role: String,
    /// Message text
    #[serde(default)]
    content: Option<String>,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.as_str().to_string(),
            content: Some(message.content.clone()),
        }
    }
}

/// Chat completion request body.
#[derive(Debug, Clone, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatCompletionRequest {
    /// Model identifier
    model: String,
    /// Conversation so far
    messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl ChatCompletionRequest {
    /// Creates a new builder for `ChatCompletionRequest`.
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::default()
    }

    /// Convert a generic request, using `default_model` unless it names one.
    pub fn from_generate(req: &GenerateRequest, default_model: &str) -> Self {
        Self {
            model: req
                .model
                .clone()
                .unwrap_or_else(|| default_model.to_string()),
            messages: req.messages.iter().map(ChatMessage::from).collect(),
            max_tokens: req.max_tokens,
            temperature: req.temperature,
        }
    }
}

/// One completion alternative.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct ChatChoice {
    /// Generated message
    message: ChatMessage,
}

/// Chat completion response body.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct ChatCompletionResponse {
    /// Returned alternatives, first is used
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if the provider returned any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_default_model() {
        let req = GenerateRequest::builder()
            .messages(vec![Message::system("sys"), Message::user("hi")])
            .temperature(Some(0.7))
            .build()
            .unwrap();
        let body = ChatCompletionRequest::from_generate(&req, "gpt-4o");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_response_first_text() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"{\"ok\":true}"}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_text(), Some("{\"ok\":true}"));

        let empty: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.first_text().is_none());
    }
}
