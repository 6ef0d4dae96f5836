//! Client for OpenAI-compatible chat completion endpoints.

mod client;
mod dto;

pub use client::{GROQ_CHAT_URL, OPENAI_CHAT_URL, OpenAICompatibleClient};
pub use dto::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
