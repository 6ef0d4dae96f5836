//! Shot planning.

use crate::agent::generate_text;
use crate::{
    Agent, AgentKind, CINEMATOGRAPHY_SYSTEM_PROMPT, identity_constraints, parse_json_object,
    render_system_prompt,
};
use async_trait::async_trait;
use reel_core::{IdentityProfile, JsonMap, KnowledgeCategory, Screenplay};
use reel_interface::ReelDriver;
use reel_knowledge::{DEFAULT_TOP_K, KnowledgeRetriever};
use std::sync::Arc;
use tracing::{info, instrument};

/// Fixed retrieval query for cinematography craft.
const CINEMATOGRAPHY_QUERY: &str = "lighting camera angle cinematic";

/// Input to one visual planning pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CinematographyRequest {
    /// Screenplay to visualize
    pub script: Screenplay,
    /// Registered characters
    pub identities: Vec<IdentityProfile>,
    /// Critic notes from the previous pass
    pub feedback: Option<String>,
}

impl CinematographyRequest {
    /// First planning pass, without feedback.
    pub fn new(script: Screenplay, identities: Vec<IdentityProfile>) -> Self {
        Self {
            script,
            identities,
            feedback: None,
        }
    }

    /// Attach critic feedback from a rejected pass.
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }
}

/// Translates narrative beats into optical specifications.
#[derive(Clone)]
pub struct CinematographyAgent {
    driver: Arc<dyn ReelDriver>,
    retriever: Arc<KnowledgeRetriever>,
}

impl CinematographyAgent {
    /// Create the agent around a shared driver and retriever.
    pub fn new(driver: Arc<dyn ReelDriver>, retriever: Arc<KnowledgeRetriever>) -> Self {
        Self { driver, retriever }
    }
}

#[async_trait]
impl Agent for CinematographyAgent {
    type Request = CinematographyRequest;

    fn kind(&self) -> AgentKind {
        AgentKind::Cinematography
    }

    #[instrument(skip_all, fields(agent = %self.kind(), revision = request.feedback.is_some()))]
    async fn run(&self, request: &CinematographyRequest) -> JsonMap {
        info!("Analyzing script for visual translation");

        let items = self
            .retriever
            .retrieve(
                CINEMATOGRAPHY_QUERY,
                Some(KnowledgeCategory::Cinematography),
                DEFAULT_TOP_K,
            )
            .await;
        let mut context = KnowledgeRetriever::format_context(&items);
        context.push_str(&identity_constraints(&request.identities));

        let system_prompt = render_system_prompt(CINEMATOGRAPHY_SYSTEM_PROMPT, &context);
        let mut user_prompt = format!(
            "Generate optical specifications for this script:\n{}",
            request.script.to_json_string()
        );
        if let Some(feedback) = request.feedback.as_deref().filter(|f| !f.is_empty()) {
            user_prompt.push_str(&format!("\n\nIMPORTANT FEEDBACK FROM CRITIC: {}", feedback));
        }

        let reply =
            generate_text(self.driver.as_ref(), self.kind(), &system_prompt, &user_prompt).await;
        parse_json_object(&reply)
    }
}
