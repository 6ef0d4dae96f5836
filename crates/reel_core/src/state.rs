//! Aggregate state of one production run.

use crate::{Event, IdentityProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of detail characters echoed into the log for each event.
const LOG_DETAIL_CHARS: usize = 50;

/// Everything known about the project being produced.
///
/// Constructed once per pipeline run. Fields are read through accessors;
/// identities and history change only through the methods below, and the
/// history is append-only.
///
/// # Examples
///
/// ```
/// use reel_core::{IdentityProfile, ProjectState};
///
/// let mut state = ProjectState::new("A detective in a rainy city");
/// assert_eq!(state.title(), "Untitled");
///
/// let cole = IdentityProfile::builder()
///     .name("Cole")
///     .archetype("The Anti-Hero")
///     .visual_embedding_trigger("img_ch_cole")
///     .canonical_appearance("40s, weary")
///     .build()
///     .unwrap();
/// state.register_identity(cole);
///
/// assert!(state.get_identity("Cole").is_some());
/// assert_eq!(state.history().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ProjectState {
    /// Working title, taken from the screenplay once one exists
    title: String,
    /// One-line pitch the run started from
    logline: String,
    /// Genre label
    genre: String,
    /// Registered characters keyed by name
    identities: BTreeMap<String, IdentityProfile>,
    /// Append-only audit log
    history: Vec<Event>,
}

impl ProjectState {
    /// Start a project from a logline with default title and genre.
    pub fn new(logline: impl Into<String>) -> Self {
        Self {
            title: "Untitled".to_string(),
            logline: logline.into(),
            genre: "Unknown".to_string(),
            identities: BTreeMap::new(),
            history: Vec::new(),
        }
    }

    /// Replace the working title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Append an event to the history and echo it to the log.
    pub fn log_event(
        &mut self,
        agent: impl Into<String>,
        action: impl Into<String>,
        details: impl Into<String>,
    ) {
        let event = Event::now(agent, action, details);
        let preview: String = event.details().chars().take(LOG_DETAIL_CHARS).collect();
        tracing::info!(
            agent = %event.agent(),
            action = %event.action(),
            details = %preview,
            "Project event"
        );
        self.history.push(event);
    }

    /// Look up a character by name.
    pub fn get_identity(&self, name: &str) -> Option<&IdentityProfile> {
        self.identities.get(name)
    }

    /// Register a character, replacing any profile with the same name.
    pub fn register_identity(&mut self, profile: IdentityProfile) {
        let name = profile.name().clone();
        self.identities.insert(name.clone(), profile);
        self.log_event("IdentityManager", "registered_identity", name);
    }

    /// Replace the whole identity set.
    ///
    /// Each profile is registered in turn, so every one gets its own
    /// `registered_identity` event.
    pub fn replace_identities(&mut self, profiles: impl IntoIterator<Item = IdentityProfile>) {
        self.identities.clear();
        for profile in profiles {
            self.register_identity(profile);
        }
    }

    /// Registered profiles in name order, for prompt injection.
    pub fn identity_list(&self) -> Vec<IdentityProfile> {
        self.identities.values().cloned().collect()
    }
}
