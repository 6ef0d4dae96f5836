//! Core data types for the Reel production pipeline.
//!
//! This crate holds the data model shared by every other crate: the project
//! state of a single run, character identities, knowledge items, the
//! artifacts passed between phases and the request types sent to text
//! generation backends.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod event;
mod identity;
mod knowledge;
mod message;
mod request;
mod role;
mod shot;
mod state;

pub use artifact::{Critique, JsonMap, Screenplay, ShotList};
pub use event::Event;
pub use identity::{IdentityProfile, IdentityProfileBuilder};
pub use knowledge::{KnowledgeCategory, KnowledgeItem};
pub use message::Message;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, Output};
pub use role::Role;
pub use shot::{ShotResult, ShotStatus, shot_id};
pub use state::ProjectState;
