//! Text generation providers for Reel.
//!
//! Every provider implements [`ReelDriver`](reel_interface::ReelDriver).
//!
//! # Available Providers
//!
//! - **OpenAI** - chat completions, key from `OPENAI_API_KEY`
//! - **Groq** - OpenAI-compatible endpoint, key from `GROQ_API_KEY`
//! - **Mock** - canned offline responses for demos and tests
//!
//! # Example
//!
//! ```no_run
//! use reel_core::{GenerateRequest, Message};
//! use reel_interface::ReelDriver;
//! use reel_models::LlmProvider;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let driver = LlmProvider::Groq.resolve().build_driver(None)?;
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("Hello")])
//!     .build()?;
//! let response = driver.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod mock;
mod openai_compat;
mod provider;

pub use mock::MockDriver;
pub use openai_compat::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, GROQ_CHAT_URL,
    OPENAI_CHAT_URL, OpenAICompatibleClient,
};
pub use provider::LlmProvider;
