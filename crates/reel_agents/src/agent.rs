//! The agent contract.

use async_trait::async_trait;
use reel_core::{GenerateRequest, JsonMap, Message};
use reel_interface::ReelDriver;
use tracing::{debug, error};

/// Closed set of pipeline agents, used to attribute events and logs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum AgentKind {
    /// Defines character identities
    #[strum(serialize = "IdentityManager")]
    Identity,
    /// Writes the screenplay
    #[strum(serialize = "Screenwriter")]
    Narrative,
    /// Plans the shots
    #[strum(serialize = "DirectorOfPhotography")]
    Cinematography,
    /// Reviews the shot list
    #[strum(serialize = "Critic")]
    Critic,
}

/// A pipeline stage backed by a text generation model.
///
/// Agents hold a shared driver handle (and a retriever where they need
/// grounding) and nothing else; they never touch project state.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Input the agent works from.
    type Request: Send + Sync;

    /// Which agent this is.
    fn kind(&self) -> AgentKind;

    /// Produce a JSON object for the request, empty on failure.
    async fn run(&self, request: &Self::Request) -> JsonMap;
}

/// Send a (system, user) prompt pair and return the raw reply.
///
/// Driver errors are logged and reported as an empty reply.
pub(crate) async fn generate_text(
    driver: &dyn ReelDriver,
    kind: AgentKind,
    system_prompt: &str,
    user_prompt: &str,
) -> String {
    let request = GenerateRequest {
        messages: vec![Message::system(system_prompt), Message::user(user_prompt)],
        ..Default::default()
    };

    match driver.generate(&request).await {
        Ok(response) => {
            let text = response.text();
            debug!(agent = %kind, chars = text.len(), "Agent received reply");
            text
        }
        Err(e) => {
            error!(
                agent = %kind,
                provider = driver.provider_name(),
                model = driver.model_name(),
                error = %e,
                "Text generation failed"
            );
            String::new()
        }
    }
}
