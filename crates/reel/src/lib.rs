//! Reel - concept to screenplay to shot list
//!
//! Reel takes a one-line concept through a crew of agents: an identity
//! manager fixes how each character looks, a screenwriter drafts the
//! screenplay, a director of photography turns it into a shot list, and a
//! critic sends the shot list back for revision a bounded number of times.
//! The approved (or last) shot list is handed to a visual engine that renders
//! an anchor frame and a motion clip per shot.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use reel::{StudioConfig, build_orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StudioConfig::load(None)?;
//!     let studio = build_orchestrator(&config).await?;
//!
//!     let outcome = studio.run_pipeline("A detective in a cyberpunk city", Some(2)).await;
//!     println!("{}: {} shots", outcome.title(), outcome.produced().len());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `reel_error` - Error types
//! - `reel_core` - Project state, identities, artifacts
//! - `reel_interface` - `ReelDriver`, `KnowledgeStore`, `ShotProducer` traits
//! - `reel_models` - Text generation backends
//! - `reel_knowledge` - Knowledge retrieval
//! - `reel_agents` - The four crew agents
//! - `reel_production` - Image and video generation
//! - `reel_orchestrator` - Phase sequencing and the critique loop
//!
//! This crate (`reel`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod studio;

pub use config::{KnowledgeSection, LlmSection, MediaSection, StudioConfig, StudioSection};
pub use studio::{build_orchestrator, build_retriever, ingest_documents};

pub use reel_agents::*;
pub use reel_core::*;
pub use reel_error::*;
pub use reel_interface::*;
pub use reel_knowledge::*;
pub use reel_models::*;
pub use reel_orchestrator::*;
pub use reel_production::*;
