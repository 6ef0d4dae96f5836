//! Trait definitions for pipeline backends.

use async_trait::async_trait;
use reel_core::{GenerateRequest, GenerateResponse, KnowledgeCategory, KnowledgeItem, ShotResult};
use reel_error::ReelResult;
use serde_json::Value;

/// Core trait that all text generation backends must implement.
#[async_trait]
pub trait ReelDriver: Send + Sync {
    /// Generate model output for a (system, user) prompt pair.
    async fn generate(&self, req: &GenerateRequest) -> ReelResult<GenerateResponse>;

    /// Provider name (e.g., "openai", "groq", "mock").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o").
    fn model_name(&self) -> &str;
}

/// An indexed document store that ranks knowledge items for a query.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Return up to `n_results` items, most relevant first.
    ///
    /// When `category` is given only items of that category are considered.
    async fn query(
        &self,
        text: &str,
        n_results: usize,
        category: Option<KnowledgeCategory>,
    ) -> ReelResult<Vec<KnowledgeItem>>;

    /// Short name for logs.
    fn store_name(&self) -> &'static str;
}

/// Turns one shot document into media.
#[async_trait]
pub trait ShotProducer: Send + Sync {
    /// Produce the shot.
    ///
    /// A shot that could not be made is reported either as an error or as a
    /// result with failed status; callers treat both the same way.
    async fn generate_shot(&self, shot: &Value) -> ReelResult<ShotResult>;
}
