//! Screenplay development.

use crate::agent::generate_text;
use crate::prompts::established_characters;
use crate::{Agent, AgentKind, NARRATIVE_SYSTEM_PROMPT, parse_json_object, render_system_prompt};
use async_trait::async_trait;
use reel_core::{IdentityProfile, JsonMap, KnowledgeCategory};
use reel_interface::ReelDriver;
use reel_knowledge::{DEFAULT_TOP_K, KnowledgeRetriever};
use std::sync::Arc;
use tracing::{info, instrument};

/// Input to the narrative phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NarrativeRequest {
    /// Project concept
    pub concept: String,
    /// Registered characters
    pub identities: Vec<IdentityProfile>,
}

impl NarrativeRequest {
    /// Request a screenplay for a concept and cast.
    pub fn new(concept: impl Into<String>, identities: Vec<IdentityProfile>) -> Self {
        Self {
            concept: concept.into(),
            identities,
        }
    }
}

/// Writes the screenplay, grounded in screenwriting craft knowledge.
#[derive(Clone)]
pub struct NarrativeAgent {
    driver: Arc<dyn ReelDriver>,
    retriever: Arc<KnowledgeRetriever>,
}

impl NarrativeAgent {
    /// Create the agent around a shared driver and retriever.
    pub fn new(driver: Arc<dyn ReelDriver>, retriever: Arc<KnowledgeRetriever>) -> Self {
        Self { driver, retriever }
    }
}

#[async_trait]
impl Agent for NarrativeAgent {
    type Request = NarrativeRequest;

    fn kind(&self) -> AgentKind {
        AgentKind::Narrative
    }

    #[instrument(skip_all, fields(agent = %self.kind()))]
    async fn run(&self, request: &NarrativeRequest) -> JsonMap {
        info!(concept = %request.concept, "Processing concept");

        let items = self
            .retriever
            .retrieve(
                &format!("{} structure hero", request.concept),
                Some(KnowledgeCategory::Screenwriting),
                DEFAULT_TOP_K,
            )
            .await;
        let context = KnowledgeRetriever::format_context(&items);

        let system_prompt = render_system_prompt(NARRATIVE_SYSTEM_PROMPT, &context);
        let user_prompt = format!(
            "Develop the narrative for: {}{}",
            request.concept,
            established_characters(&request.identities)
        );

        let reply =
            generate_text(self.driver.as_ref(), self.kind(), &system_prompt, &user_prompt).await;
        parse_json_object(&reply)
    }
}
