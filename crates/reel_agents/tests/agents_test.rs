use async_trait::async_trait;
use reel_agents::{
    Agent, AgentKind, CinematographyAgent, CinematographyRequest, CriticAgent, CritiqueRequest,
    IdentityAgent, IdentityRequest, NarrativeAgent, NarrativeRequest,
};
use reel_core::{
    Critique, GenerateRequest, GenerateResponse, IdentityProfile, JsonMap, ProjectState,
    Screenplay, ShotList,
};
use reel_error::{BackendError, ReelResult};
use reel_interface::ReelDriver;
use reel_knowledge::KnowledgeRetriever;
use reel_models::MockDriver;
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Records every request and answers with a fixed reply.
struct RecordingDriver {
    reply: String,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl RecordingDriver {
    fn new(reply: &str) -> (Arc<Self>, Arc<Mutex<Vec<GenerateRequest>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let driver = Arc::new(Self {
            reply: reply.to_string(),
            requests: requests.clone(),
        });
        (driver, requests)
    }
}

#[async_trait]
impl ReelDriver for RecordingDriver {
    async fn generate(&self, req: &GenerateRequest) -> ReelResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        Ok(GenerateResponse::from_text(self.reply.clone()))
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }

    fn model_name(&self) -> &str {
        "recording"
    }
}

struct FailingDriver;

#[async_trait]
impl ReelDriver for FailingDriver {
    async fn generate(&self, _req: &GenerateRequest) -> ReelResult<GenerateResponse> {
        Err(BackendError::new("connection reset").into())
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

fn map(value: serde_json::Value) -> JsonMap {
    value.as_object().cloned().unwrap_or_default()
}

fn cole() -> IdentityProfile {
    IdentityProfile::builder()
        .name("Detective Cole")
        .archetype("The Anti-Hero")
        .visual_embedding_trigger("img_ch_cole")
        .canonical_appearance("40s, weary face")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_identity_agent_with_mock_driver() {
    let agent = IdentityAgent::new(Arc::new(MockDriver::new()));
    let result = agent.run(&IdentityRequest::new("A noir detective story")).await;

    assert!(result.contains_key("profiles"));

    let mut state = ProjectState::new("A noir detective story");
    let registered = agent.update_state(&mut state, &result);
    assert_eq!(registered, 1);
    assert!(state.get_identity("Detective Cole").is_some());
    assert_eq!(agent.kind(), AgentKind::Identity);
}

#[tokio::test]
async fn test_identity_prompt_lists_script_characters() {
    let (driver, requests) = RecordingDriver::new("{}");
    let agent = IdentityAgent::new(driver);
    let request = IdentityRequest::new("heist").with_characters(vec!["Mara".into(), "Bo".into()]);
    agent.run(&request).await;

    let requests = requests.lock().unwrap();
    let user = requests[0].user_prompt().unwrap();
    assert!(user.starts_with("Define visual profiles for the main characters"));
    assert!(user.contains("Concept: heist"));
    assert!(user.contains("Mara"));
}

#[test]
fn test_update_state_skips_malformed_entries() {
    let agent = IdentityAgent::new(Arc::new(MockDriver::new()));
    let result = map(json!({
        "profiles": [
            {"name": "Ann", "archetype": "Hero", "visual_embedding_trigger": "img_ann", "canonical_appearance": "tall"},
            {"name": "Bo", "archetype": "Villain"},
            {"name": "Cy", "archetype": 5, "visual_embedding_trigger": "img_cy", "canonical_appearance": "short"},
            "not an object",
            {"name": "Di", "archetype": "Mentor", "visual_embedding_trigger": "img_di", "canonical_appearance": "old",
             "wardrobe": {"default": "robe"}}
        ]
    }));

    let mut state = ProjectState::new("concept");
    assert_eq!(agent.update_state(&mut state, &result), 2);
    assert!(state.get_identity("Ann").is_some());
    assert!(state.get_identity("Bo").is_none());
    assert!(state.get_identity("Cy").is_none());
    assert_eq!(
        state.get_identity("Di").unwrap().wardrobe().get("default"),
        Some(&"robe".to_string())
    );
}

#[test]
fn test_update_state_rejects_duplicate_trigger() {
    let agent = IdentityAgent::new(Arc::new(MockDriver::new()));
    let result = map(json!({
        "profiles": [
            {"name": "Ann", "archetype": "Hero", "visual_embedding_trigger": "img_x", "canonical_appearance": "tall"},
            {"name": "Bo", "archetype": "Villain", "visual_embedding_trigger": "img_x", "canonical_appearance": "short"}
        ]
    }));

    let mut state = ProjectState::new("concept");
    assert_eq!(agent.update_state(&mut state, &result), 1);
    assert!(state.get_identity("Ann").is_some());
    assert!(state.get_identity("Bo").is_none());
}

#[test]
fn test_update_state_same_name_later_wins() {
    let agent = IdentityAgent::new(Arc::new(MockDriver::new()));
    let result = map(json!({
        "profiles": [
            {"name": "Ann", "archetype": "Hero", "visual_embedding_trigger": "img_ann", "canonical_appearance": "young"},
            {"name": "Ann", "archetype": "Hero", "visual_embedding_trigger": "img_ann", "canonical_appearance": "older"}
        ]
    }));

    let mut state = ProjectState::new("concept");
    assert_eq!(agent.update_state(&mut state, &result), 1);
    assert_eq!(state.identities().len(), 1);
    assert_eq!(state.get_identity("Ann").unwrap().canonical_appearance(), "older");
}

#[test]
fn test_update_state_replaces_previous_identities() {
    let agent = IdentityAgent::new(Arc::new(MockDriver::new()));
    let mut state = ProjectState::new("concept");
    state.register_identity(cole());

    let result = map(json!({
        "profiles": [
            {"name": "Ann", "archetype": "Hero", "visual_embedding_trigger": "img_ann", "canonical_appearance": "tall"}
        ]
    }));
    agent.update_state(&mut state, &result);

    assert!(state.get_identity("Detective Cole").is_none());
    assert_eq!(state.identities().len(), 1);
}

#[tokio::test]
async fn test_narrative_prompt_includes_knowledge_and_cast() {
    let (driver, requests) = RecordingDriver::new(r#"{"title": "Rain"}"#);
    let agent = NarrativeAgent::new(driver, Arc::new(KnowledgeRetriever::new()));

    let result = agent
        .run(&NarrativeRequest::new("a hero in the rain", vec![cole()]))
        .await;
    assert_eq!(Screenplay::new(result).title(), "Rain");

    let requests = requests.lock().unwrap();
    let system = requests[0].system_prompt().unwrap();
    assert!(system.contains("### Relevant Technical Context:"));
    assert!(system.contains("The Hero's Journey"));

    let user = requests[0].user_prompt().unwrap();
    assert!(user.starts_with("Develop the narrative for: a hero in the rain"));
    assert!(user.contains("Detective Cole"));
}

#[tokio::test]
async fn test_cinematography_prompt_carries_identities_and_feedback() {
    let (driver, requests) = RecordingDriver::new(r#"{"shots": [{"shot_id": 1}]}"#);
    let agent = CinematographyAgent::new(driver, Arc::new(KnowledgeRetriever::new()));
    let script = Screenplay::new(map(json!({"title": "Rain"})));

    let first = agent
        .run(&CinematographyRequest::new(script.clone(), vec![cole()]))
        .await;
    assert_eq!(ShotList::new(first).shots().len(), 1);

    agent
        .run(&CinematographyRequest::new(script, vec![cole()]).with_feedback("Use a wider lens"))
        .await;

    let requests = requests.lock().unwrap();
    let system = requests[0].system_prompt().unwrap();
    assert!(system.contains("Trigger='img_ch_cole'"));
    assert!(system.contains("Rembrandt Lighting"));

    let first_user = requests[0].user_prompt().unwrap();
    assert!(first_user.starts_with("Generate optical specifications for this script:\n"));
    assert!(first_user.contains(r#""title":"Rain""#));
    assert!(!first_user.contains("IMPORTANT FEEDBACK FROM CRITIC"));

    let second_user = requests[1].user_prompt().unwrap();
    assert!(second_user.ends_with("\n\nIMPORTANT FEEDBACK FROM CRITIC: Use a wider lens"));
}

#[tokio::test]
async fn test_critic_reads_verdict() {
    let (driver, requests) = RecordingDriver::new(
        "```json\n{\"status\": \"rejected\", \"feedback\": \"Shot 2 lacks the trigger\"}\n```",
    );
    let agent = CriticAgent::new(driver);
    let request = CritiqueRequest::new(
        Screenplay::new(map(json!({"title": "Rain"}))),
        ShotList::new(map(json!({"shots": []}))),
    );

    let critique = Critique::from_map(&agent.run(&request).await);
    assert!(!critique.is_approved());
    assert_eq!(critique.feedback.as_deref(), Some("Shot 2 lacks the trigger"));

    let requests = requests.lock().unwrap();
    assert!(requests[0].user_prompt().unwrap().starts_with("Evaluate this shot list"));
}

#[tokio::test]
async fn test_driver_failure_yields_empty_result() {
    let driver: Arc<dyn ReelDriver> = Arc::new(FailingDriver);
    let retriever = Arc::new(KnowledgeRetriever::new());

    let narrative = NarrativeAgent::new(driver.clone(), retriever.clone());
    assert!(narrative.run(&NarrativeRequest::new("x", vec![])).await.is_empty());

    let critic = CriticAgent::new(driver);
    assert!(critic.run(&CritiqueRequest::default()).await.is_empty());
}
