//! Phase sequencing and critique loop for the Reel pipeline.
//!
//! The [`Orchestrator`] takes a one-line concept through
//! `Init → Identity → Narrative → VisualPlanning → Production → Done`,
//! revising the shot list with the critic at most [`MAX_CRITIQUE_ROUNDS`]
//! times, and reports what happened as a [`PipelineOutcome`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifacts;
mod orchestrator;
mod outcome;
mod phase;

pub use artifacts::{
    PROJECT_STATE_FILE, SCREENPLAY_FILE, SHOTLIST_FILE, persist_artifacts, write_json_pretty,
};
pub use orchestrator::{DEFAULT_FEEDBACK, MAX_CRITIQUE_ROUNDS, Orchestrator};
pub use outcome::{PhaseFailure, PipelineOutcome};
pub use phase::Phase;
