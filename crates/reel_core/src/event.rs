//! Audit events recorded during a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One immutable entry in the project history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Event {
    /// When the event was recorded
    timestamp: DateTime<Utc>,
    /// Component that caused the event
    agent: String,
    /// Short action label, e.g. `shot_produced`
    action: String,
    /// Free-text detail
    details: String,
}

impl Event {
    /// Record an event stamped with the current time.
    pub fn now(
        agent: impl Into<String>,
        action: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            agent: agent.into(),
            action: action.into(),
            details: details.into(),
        }
    }
}
