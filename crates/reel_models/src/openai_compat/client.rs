//! OpenAI-compatible chat completion client using reqwest.

use crate::openai_compat::{ChatCompletionRequest, ChatCompletionResponse};
use async_trait::async_trait;
use reel_core::{GenerateRequest, GenerateResponse};
use reel_error::{ModelsError, ModelsErrorKind, ModelsResult, ReelResult};
use reel_interface::ReelDriver;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, instrument};

/// OpenAI chat completions endpoint.
pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Groq chat completions endpoint.
pub const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Client for any provider exposing the OpenAI chat completions API.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    provider: &'static str,
}

impl OpenAICompatibleClient {
    /// Creates a client for an arbitrary endpoint.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        provider: &'static str,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
            provider,
        }
    }

    /// Creates an OpenAI client, reading the key from `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns error if the key is not set.
    #[instrument(skip_all, fields(model = %model))]
    pub fn openai(model: &str) -> ModelsResult<Self> {
        let api_key = Self::api_key_from_env("OPENAI_API_KEY")?;
        Ok(Self::new(api_key, model, OPENAI_CHAT_URL, "openai"))
    }

    /// Creates a Groq client, reading the key from `GROQ_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns error if the key is not set.
    #[instrument(skip_all, fields(model = %model))]
    pub fn groq(model: &str) -> ModelsResult<Self> {
        let api_key = Self::api_key_from_env("GROQ_API_KEY")?;
        Ok(Self::new(api_key, model, GROQ_CHAT_URL, "groq"))
    }

    fn api_key_from_env(var: &str) -> ModelsResult<String> {
        std::env::var(var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ModelsError::new(ModelsErrorKind::MissingApiKey(var.to_string())))
    }

    /// Send one completion request and return the first choice's text.
    async fn complete(&self, req: &GenerateRequest) -> ModelsResult<String> {
        let body = ChatCompletionRequest::from_generate(req, &self.model);

        debug!(
            provider = self.provider,
            model = %body.model(),
            messages = body.messages().len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                ModelsError::new(ModelsErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ModelsError::new(ModelsErrorKind::RateLimit));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, error = %message, "API error");
            return Err(ModelsError::new(ModelsErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            ModelsError::new(ModelsErrorKind::ResponseParsing(e.to_string()))
        })?;

        let text = parsed.first_text().unwrap_or_default().to_string();
        debug!(chars = text.len(), "Received completion");
        Ok(text)
    }
}

#[async_trait]
impl ReelDriver for OpenAICompatibleClient {
    #[instrument(skip(self, req), fields(provider = self.provider, model = %self.model))]
    async fn generate(&self, req: &GenerateRequest) -> ReelResult<GenerateResponse> {
        let text = self.complete(req).await?;
        Ok(GenerateResponse::from_text(text))
    }

    fn provider_name(&self) -> &'static str {
        self.provider
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
