//! Trait definitions for the Reel production pipeline.
//!
//! Each external collaborator of the pipeline sits behind one trait here:
//! text generation, indexed knowledge lookup and shot production. The
//! orchestrator and agents only ever see these traits, so tests swap in
//! hand-written mocks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{KnowledgeStore, ReelDriver, ShotProducer};
