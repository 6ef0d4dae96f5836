//! Specialized text generation agents for the Reel pipeline.
//!
//! Each agent turns one request into a JSON object by prompting a
//! [`ReelDriver`](reel_interface::ReelDriver) and decoding the reply:
//!
//! - [`IdentityAgent`] defines the cast's canonical visual identities
//! - [`NarrativeAgent`] writes the screenplay
//! - [`CinematographyAgent`] translates the screenplay into a shot list
//! - [`CriticAgent`] approves or rejects a shot list
//!
//! An empty result means the agent produced nothing usable. Agents never
//! return errors; backend failures are logged and surface as empty results.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod agent;
mod cinematography;
mod critic;
mod extraction;
mod identity;
mod narrative;
mod prompts;

pub use agent::{Agent, AgentKind};
pub use cinematography::{CinematographyAgent, CinematographyRequest};
pub use critic::{CriticAgent, CritiqueRequest};
pub use extraction::parse_json_object;
pub use identity::{IdentityAgent, IdentityRequest};
pub use narrative::{NarrativeAgent, NarrativeRequest};
pub use prompts::{
    CINEMATOGRAPHY_SYSTEM_PROMPT, CRITIC_SYSTEM_PROMPT, IDENTITY_SYSTEM_PROMPT,
    NARRATIVE_SYSTEM_PROMPT, identity_constraints, render_system_prompt,
};
