//! Shot list review.

use crate::agent::generate_text;
use crate::{Agent, AgentKind, CRITIC_SYSTEM_PROMPT, parse_json_object};
use async_trait::async_trait;
use reel_core::{JsonMap, Screenplay, ShotList};
use reel_interface::ReelDriver;
use std::sync::Arc;
use tracing::{info, instrument};

/// Input to one review.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CritiqueRequest {
    /// Screenplay the shots were planned from
    pub script: Screenplay,
    /// Shot list under review
    pub shot_list: ShotList,
}

impl CritiqueRequest {
    /// Review `shot_list` against `script`.
    pub fn new(script: Screenplay, shot_list: ShotList) -> Self {
        Self { script, shot_list }
    }
}

/// Approves or rejects a shot list.
///
/// The result is expected to be `{"status": "approved" | "rejected",
/// "feedback": "..."}`; read it with [`Critique::from_map`](reel_core::Critique::from_map).
#[derive(Clone)]
pub struct CriticAgent {
    driver: Arc<dyn ReelDriver>,
}

impl CriticAgent {
    /// Create the agent around a shared driver.
    pub fn new(driver: Arc<dyn ReelDriver>) -> Self {
        Self { driver }
    }
}

#[async_trait]
impl Agent for CriticAgent {
    type Request = CritiqueRequest;

    fn kind(&self) -> AgentKind {
        AgentKind::Critic
    }

    #[instrument(skip_all, fields(agent = %self.kind(), shots = request.shot_list.shots().len()))]
    async fn run(&self, request: &CritiqueRequest) -> JsonMap {
        info!("Reviewing shot list");

        let user_prompt = format!(
            "Evaluate this shot list against the script.\n\nScript:\n{}\n\nShot list:\n{}",
            request.script.to_json_string(),
            request.shot_list.to_json_string()
        );

        let reply = generate_text(
            self.driver.as_ref(),
            self.kind(),
            CRITIC_SYSTEM_PROMPT,
            &user_prompt,
        )
        .await;
        parse_json_object(&reply)
    }
}
