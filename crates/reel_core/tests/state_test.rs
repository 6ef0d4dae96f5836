//! Tests for project state as it is persisted between runs.

use reel_core::{IdentityProfile, ProjectState, ShotResult, ShotStatus};
use serde_json::json;

fn profile(name: &str, trigger: &str) -> IdentityProfile {
    IdentityProfile::builder()
        .name(name)
        .archetype("The Mentor")
        .visual_embedding_trigger(trigger)
        .canonical_appearance("silver hair, long coat")
        .build()
        .unwrap()
}

#[test]
fn test_project_state_document_layout() {
    let mut state = ProjectState::new("A lighthouse keeper finds a signal");
    state.set_title("Beacon");
    state.register_identity(profile("Mara", "img_ch_mara"));
    state.log_event("Screenwriter", "script_locked", "Beacon");

    let doc = serde_json::to_value(&state).unwrap();
    assert_eq!(doc["title"], "Beacon");
    assert_eq!(doc["logline"], "A lighthouse keeper finds a signal");
    assert_eq!(doc["genre"], "Unknown");
    assert_eq!(
        doc["identities"]["Mara"]["visual_embedding_trigger"],
        "img_ch_mara"
    );

    let history = doc["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1]["agent"], "Screenwriter");
    assert_eq!(history[1]["action"], "script_locked");
    assert!(history[1]["timestamp"].is_string());
}

#[test]
fn test_identity_without_wardrobe_deserializes() {
    let profile: IdentityProfile = serde_json::from_value(json!({
        "name": "Mara",
        "archetype": "The Mentor",
        "visual_embedding_trigger": "img_ch_mara",
        "canonical_appearance": "silver hair"
    }))
    .unwrap();

    assert!(profile.wardrobe().is_empty());
}

#[test]
fn test_identity_missing_trigger_is_rejected() {
    let result: Result<IdentityProfile, _> = serde_json::from_value(json!({
        "name": "Mara",
        "archetype": "The Mentor",
        "canonical_appearance": "silver hair"
    }));

    assert!(result.is_err());
}

#[test]
fn test_replace_identities_keeps_history() {
    let mut state = ProjectState::new("concept");
    state.register_identity(profile("Old", "img_ch_old"));
    state.replace_identities(vec![profile("New", "img_ch_new")]);

    assert!(state.get_identity("Old").is_none());
    assert!(state.get_identity("New").is_some());
    assert_eq!(state.history().len(), 2);
}

#[test]
fn test_shot_result_status_serializes_lowercase() {
    let failed = ShotResult::failed(json!({"shot_id": 7}));
    let doc = serde_json::to_value(&failed).unwrap();

    assert_eq!(*failed.status(), ShotStatus::Failed);
    assert_eq!(doc["status"], "failed");
    assert_eq!(failed.shot_id(), "7");
}
