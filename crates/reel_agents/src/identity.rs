//! Character identity definition.

use crate::agent::generate_text;
use crate::{Agent, AgentKind, IDENTITY_SYSTEM_PROMPT, parse_json_object};
use async_trait::async_trait;
use reel_core::{IdentityProfile, JsonMap, ProjectState};
use reel_interface::ReelDriver;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Input to the identity phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityRequest {
    /// Project concept
    pub concept: String,
    /// Character names from an existing script, if any
    pub characters: Option<Vec<String>>,
}

impl IdentityRequest {
    /// Request profiles for a bare concept.
    pub fn new(concept: impl Into<String>) -> Self {
        Self {
            concept: concept.into(),
            characters: None,
        }
    }

    /// Also list the characters named in a script.
    pub fn with_characters(mut self, characters: Vec<String>) -> Self {
        self.characters = Some(characters);
        self
    }
}

/// Defines the canonical look of every main character.
#[derive(Clone)]
pub struct IdentityAgent {
    driver: Arc<dyn ReelDriver>,
}

impl IdentityAgent {
    /// Create the agent around a shared driver.
    pub fn new(driver: Arc<dyn ReelDriver>) -> Self {
        Self { driver }
    }

    /// Register the profiles of an identity result, replacing the state's
    /// identity set.
    ///
    /// An entry is skipped with an error log when it is missing a field, has
    /// a field of the wrong type, or reuses a trigger another character in
    /// the same batch already claimed. A later entry with the same name
    /// replaces the earlier one. Returns the number of profiles registered.
    #[instrument(skip_all)]
    pub fn update_state(&self, state: &mut ProjectState, result: &JsonMap) -> usize {
        let Some(entries) = result.get("profiles").and_then(Value::as_array) else {
            error!("Identity result has no profile list");
            return 0;
        };

        let mut accepted: Vec<IdentityProfile> = Vec::new();
        let mut triggers: HashMap<String, String> = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            let profile: IdentityProfile = match serde_json::from_value(entry.clone()) {
                Ok(profile) => profile,
                Err(e) => {
                    error!(index, error = %e, "Skipping malformed identity profile");
                    continue;
                }
            };

            let trigger = profile.visual_embedding_trigger().clone();
            let claimed_by = triggers
                .get(&trigger)
                .filter(|owner| *owner != profile.name());
            if let Some(owner) = claimed_by {
                error!(
                    index,
                    name = %profile.name(),
                    trigger = %trigger,
                    owner = %owner,
                    "Skipping identity profile with a trigger already in use"
                );
                continue;
            }

            if let Some(existing) = accepted.iter_mut().find(|p| p.name() == profile.name()) {
                triggers.remove(existing.visual_embedding_trigger());
                triggers.insert(trigger, profile.name().clone());
                *existing = profile;
            } else {
                triggers.insert(trigger, profile.name().clone());
                accepted.push(profile);
            }
        }

        let count = accepted.len();
        state.replace_identities(accepted);
        info!(count, "Identities locked");
        count
    }
}

#[async_trait]
impl Agent for IdentityAgent {
    type Request = IdentityRequest;

    fn kind(&self) -> AgentKind {
        AgentKind::Identity
    }

    #[instrument(skip_all, fields(agent = %self.kind()))]
    async fn run(&self, request: &IdentityRequest) -> JsonMap {
        info!("Defining character identities");

        let mut context = format!("Concept: {}\n", request.concept);
        if let Some(characters) = &request.characters {
            context.push_str(&format!("Characters in script: {:?}", characters));
        }

        let prompt = format!(
            "Define visual profiles for the main characters in this context:\n{}",
            context
        );
        let reply = generate_text(
            self.driver.as_ref(),
            self.kind(),
            IDENTITY_SYSTEM_PROMPT,
            &prompt,
        )
        .await;
        parse_json_object(&reply)
    }
}
