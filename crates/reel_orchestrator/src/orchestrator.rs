//! The studio head: runs one concept through every phase.

use crate::{Phase, PhaseFailure, PipelineOutcome, persist_artifacts};
use reel_agents::{
    Agent, AgentKind, CinematographyAgent, CinematographyRequest, CriticAgent, CritiqueRequest,
    IdentityAgent, IdentityRequest, NarrativeAgent, NarrativeRequest,
};
use reel_core::{Critique, IdentityProfile, ProjectState, Screenplay, ShotList, shot_id};
use reel_interface::{ReelDriver, ShotProducer};
use reel_knowledge::KnowledgeRetriever;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span, warn};

/// Upper bound on planning passes per run.
pub const MAX_CRITIQUE_ROUNDS: usize = 3;

/// Feedback carried forward when the critic rejects without saying why.
pub const DEFAULT_FEEDBACK: &str = "Improve visual prompts.";

const STUDIO_HEAD: &str = "StudioHead";
const VISUAL_ENGINE: &str = "VisualEngine";

/// Sequences the pipeline phases for a concept.
///
/// Holds one instance of each agent plus the production collaborator. Runs
/// are strictly sequential: every backend call is awaited before the next
/// one starts.
///
/// # Examples
///
/// ```no_run
/// use reel_knowledge::KnowledgeRetriever;
/// use reel_models::MockDriver;
/// use reel_orchestrator::Orchestrator;
/// use reel_production::MediaProvider;
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let producer = MediaProvider::Mock.build_engine("output")?;
/// let orchestrator = Orchestrator::new(
///     Arc::new(MockDriver::new()),
///     Arc::new(KnowledgeRetriever::new()),
///     Arc::new(producer),
///     "output",
/// );
/// let outcome = orchestrator.run_pipeline("A detective in a neon city", Some(2)).await;
/// println!("{}: {} shots", outcome.title(), outcome.produced().len());
/// # Ok(())
/// # }
/// ```
pub struct Orchestrator {
    identity: IdentityAgent,
    narrative: NarrativeAgent,
    cinematography: CinematographyAgent,
    critic: CriticAgent,
    producer: Arc<dyn ShotProducer>,
    output_dir: PathBuf,
}

impl Orchestrator {
    /// Assemble the crew around a shared driver and retriever.
    pub fn new(
        driver: Arc<dyn ReelDriver>,
        retriever: Arc<KnowledgeRetriever>,
        producer: Arc<dyn ShotProducer>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            identity: IdentityAgent::new(driver.clone()),
            narrative: NarrativeAgent::new(driver.clone(), retriever.clone()),
            cinematography: CinematographyAgent::new(driver.clone(), retriever),
            critic: CriticAgent::new(driver),
            producer,
            output_dir: output_dir.into(),
        }
    }

    /// Directory artifacts are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Take `concept` through every phase.
    ///
    /// Production stops after `max_shots` shots when given. The run executes
    /// inside a `pipeline_run` span carrying its run id.
    pub async fn run_pipeline(&self, concept: &str, max_shots: Option<usize>) -> PipelineOutcome {
        let run_id = uuid::Uuid::new_v4().to_string();
        let span = info_span!("pipeline_run", run_id = %run_id, concept = %concept);
        self.run_phases(run_id, concept, max_shots)
            .instrument(span)
            .await
    }

    async fn run_phases(
        &self,
        run_id: String,
        concept: &str,
        max_shots: Option<usize>,
    ) -> PipelineOutcome {
        info!(phase = %Phase::Init, "Studio head initialized");
        let mut state = ProjectState::new(concept);
        state.log_event(STUDIO_HEAD, "greenlight_project", concept);
        let mut outcome = PipelineOutcome::new(run_id, state);

        info!(phase = %Phase::Identity, "Identity definition");
        self.run_identity(concept, outcome.state_mut()).await;

        info!(phase = %Phase::Narrative, "Narrative engineering");
        let identities = outcome.state().identity_list();
        let script = Screenplay::new(
            self.narrative
                .run(&NarrativeRequest::new(concept, identities.clone()))
                .await,
        );
        if script.is_empty() {
            error!("Screenwriting failed, aborting");
            return outcome.fail(PhaseFailure::new(
                Phase::Narrative,
                "screenwriter returned no usable screenplay",
            ));
        }
        let title = script.title().to_string();
        outcome.state_mut().set_title(title.clone());
        outcome
            .state_mut()
            .log_event(AgentKind::Narrative.to_string(), "script_locked", title);
        outcome.set_script(script.clone());

        info!(phase = %Phase::VisualPlanning, "Cinematography and critique");
        let (shot_list, approved, rounds) = self.plan_shots(&script, &identities).await;
        if shot_list.is_empty() {
            error!(rounds, "Shot planning produced no shots");
            return outcome.fail(PhaseFailure::new(
                Phase::VisualPlanning,
                "cinematography returned no shots",
            ));
        }
        if !approved {
            warn!(rounds, "Critique rounds exhausted, continuing with last shot list");
        }

        if let Err(e) =
            persist_artifacts(&self.output_dir, &script, &shot_list, outcome.state()).await
        {
            error!(error = %e, "Failed to save artifacts");
        }
        outcome.set_shot_list(shot_list.clone(), approved, rounds);

        info!(phase = %Phase::Production, "Anchor-first production");
        self.produce(&shot_list, max_shots, &mut outcome).await;

        info!(
            phase = %Phase::Done,
            produced = outcome.produced().len(),
            "Production wrap"
        );
        outcome
    }

    /// Run the identity agent and register what it returns.
    ///
    /// A result without usable profiles leaves the run with no identities.
    async fn run_identity(&self, concept: &str, state: &mut ProjectState) {
        let result = self.identity.run(&IdentityRequest::new(concept)).await;
        state.log_event(self.identity.kind().to_string(), "profiles_generated", "");

        let registered = if result.contains_key("profiles") {
            self.identity.update_state(state, &result)
        } else {
            0
        };

        if registered == 0 {
            warn!("Identity generation returned incomplete data");
        } else {
            let names: Vec<&String> = state.identities().keys().collect();
            info!(?names, "Identities locked");
        }
    }

    /// Plan and critique shots, returning the last shot list, whether it was
    /// approved and how many passes ran.
    async fn plan_shots(
        &self,
        script: &Screenplay,
        identities: &[IdentityProfile],
    ) -> (ShotList, bool, usize) {
        let mut shot_list = ShotList::default();
        let mut feedback: Option<String> = None;

        for round in 1..=MAX_CRITIQUE_ROUNDS {
            info!(round, max = MAX_CRITIQUE_ROUNDS, "Optimization loop");

            let mut request = CinematographyRequest::new(script.clone(), identities.to_vec());
            if let Some(notes) = &feedback {
                request = request.with_feedback(notes.clone());
            }
            shot_list = ShotList::new(self.cinematography.run(&request).await);

            let review = self
                .critic
                .run(&CritiqueRequest::new(script.clone(), shot_list.clone()))
                .await;
            let critique = Critique::from_map(&review);

            if critique.is_approved() {
                info!(round, "Critic approved the visual plan");
                return (shot_list, true, round);
            }

            let notes = critique
                .feedback
                .unwrap_or_else(|| DEFAULT_FEEDBACK.to_string());
            info!(round, feedback = %notes, "Critic rejected the visual plan");
            feedback = Some(notes);
        }

        (shot_list, false, MAX_CRITIQUE_ROUNDS)
    }

    /// Render shots in order, skipping the ones that fail.
    async fn produce(
        &self,
        shot_list: &ShotList,
        max_shots: Option<usize>,
        outcome: &mut PipelineOutcome,
    ) {
        let shots = shot_list.shots();
        let limit = match max_shots {
            Some(limit) => {
                info!(limit, "Limiting production");
                limit
            }
            None => shots.len(),
        };

        for shot in shots.iter().take(limit) {
            let id = shot_id(shot);
            match self.producer.generate_shot(shot).await {
                Ok(result) if result.is_success() => {
                    outcome
                        .state_mut()
                        .log_event(VISUAL_ENGINE, "shot_produced", id);
                    outcome.push_produced(result);
                }
                Ok(_) => error!(shot_id = %id, "Failed to produce shot"),
                Err(e) => error!(shot_id = %id, error = %e, "Failed to produce shot"),
            }
        }
    }
}
