//! Text provider selection.

use crate::{MockDriver, OpenAICompatibleClient};
use reel_error::ModelsResult;
use reel_interface::ReelDriver;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Which text generation backend a run uses.
///
/// # Examples
///
/// ```
/// use reel_models::LlmProvider;
///
/// let provider: LlmProvider = "groq".parse().unwrap();
/// assert_eq!(provider, LlmProvider::Groq);
/// assert_eq!(provider.default_model(), "llama-3.3-70b-versatile");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LlmProvider {
    /// Canned offline responses
    #[default]
    Mock,
    /// OpenAI chat completions
    #[strum(serialize = "openai")]
    #[serde(rename = "openai")]
    OpenAi,
    /// Groq chat completions
    Groq,
}

impl LlmProvider {
    /// Model used when the configuration names none.
    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Mock => "mock",
            LlmProvider::OpenAi => "gpt-4o",
            LlmProvider::Groq => "llama-3.3-70b-versatile",
        }
    }

    /// Environment variable holding the provider's API key.
    pub fn api_key_var(&self) -> Option<&'static str> {
        match self {
            LlmProvider::Mock => None,
            LlmProvider::OpenAi => Some("OPENAI_API_KEY"),
            LlmProvider::Groq => Some("GROQ_API_KEY"),
        }
    }

    /// Fall back to the mock provider when the API key is missing.
    pub fn resolve(self) -> Self {
        match self.api_key_var() {
            Some(var) if std::env::var(var).map(|v| v.trim().is_empty()).unwrap_or(true) => {
                warn!(provider = %self, var, "API key not set, using mock provider");
                LlmProvider::Mock
            }
            _ => self,
        }
    }

    /// Build the driver for this provider.
    ///
    /// # Errors
    ///
    /// Returns error if the provider needs an API key that is not set.
    pub fn build_driver(&self, model: Option<&str>) -> ModelsResult<Arc<dyn ReelDriver>> {
        let model = model.unwrap_or(self.default_model());
        info!(provider = %self, model, "Selected text provider");
        let driver: Arc<dyn ReelDriver> = match self {
            LlmProvider::Mock => Arc::new(MockDriver::new()),
            LlmProvider::OpenAi => Arc::new(OpenAICompatibleClient::openai(model)?),
            LlmProvider::Groq => Arc::new(OpenAICompatibleClient::groq(model)?),
        };
        Ok(driver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_names() {
        assert_eq!("openai".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAi);
        assert_eq!("Mock".parse::<LlmProvider>().unwrap(), LlmProvider::Mock);
        assert!("deepseek".parse::<LlmProvider>().is_err());
        assert_eq!(LlmProvider::OpenAi.to_string(), "openai");
    }

    #[test]
    fn test_mock_needs_no_key() {
        assert_eq!(LlmProvider::Mock.resolve(), LlmProvider::Mock);
        let driver = LlmProvider::Mock.build_driver(None).unwrap();
        assert_eq!(driver.provider_name(), "mock");
    }
}
