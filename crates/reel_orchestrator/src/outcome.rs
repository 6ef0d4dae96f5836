//! Result of a pipeline run.

use crate::Phase;
use reel_core::{ProjectState, Screenplay, ShotList, ShotResult};

/// The phase that stopped the pipeline and why.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct PhaseFailure {
    /// Phase that failed
    phase: Phase,
    /// Human-readable reason
    reason: String,
}

impl PhaseFailure {
    /// Record a failure at `phase`.
    pub fn new(phase: Phase, reason: impl Into<String>) -> Self {
        Self {
            phase,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for PhaseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} phase failed: {}", self.phase, self.reason)
    }
}

/// Everything a pipeline run produced.
///
/// `script` is absent when the narrative phase failed; `shot_list` is absent
/// when either the narrative or the visual planning phase failed.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct PipelineOutcome {
    /// Identifier of the run, also recorded on the `pipeline_run` span
    run_id: String,
    /// Final project state
    state: ProjectState,
    /// Screenplay, if the narrative phase succeeded
    script: Option<Screenplay>,
    /// Last shot list, if visual planning produced one
    shot_list: Option<ShotList>,
    /// Shots that were produced successfully
    produced: Vec<ShotResult>,
    /// Whether the critic approved the last shot list
    approved: bool,
    /// Number of planning passes run
    critique_rounds: usize,
    /// Where the pipeline stopped early, if it did
    failure: Option<PhaseFailure>,
}

impl PipelineOutcome {
    pub(crate) fn new(run_id: String, state: ProjectState) -> Self {
        Self {
            run_id,
            state,
            script: None,
            shot_list: None,
            produced: Vec::new(),
            approved: false,
            critique_rounds: 0,
            failure: None,
        }
    }

    pub(crate) fn state_mut(&mut self) -> &mut ProjectState {
        &mut self.state
    }

    pub(crate) fn set_script(&mut self, script: Screenplay) {
        self.script = Some(script);
    }

    pub(crate) fn set_shot_list(&mut self, shot_list: ShotList, approved: bool, rounds: usize) {
        self.shot_list = Some(shot_list);
        self.approved = approved;
        self.critique_rounds = rounds;
    }

    pub(crate) fn push_produced(&mut self, result: ShotResult) {
        self.produced.push(result);
    }

    pub(crate) fn fail(mut self, failure: PhaseFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// True when no phase failed.
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Title of the screenplay, `Untitled` when there is none.
    pub fn title(&self) -> &str {
        self.script
            .as_ref()
            .map(Screenplay::title)
            .unwrap_or("Untitled")
    }
}
