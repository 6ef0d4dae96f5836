//! Pipeline phases.

use serde::{Deserialize, Serialize};

/// Pipeline phases in execution order.
///
/// Transitions only ever move forward.
///
/// # Examples
///
/// ```
/// use reel_orchestrator::Phase;
/// use strum::IntoEnumIterator;
///
/// let order: Vec<String> = Phase::iter().map(|p| p.to_string()).collect();
/// assert_eq!(order.first().map(String::as_str), Some("init"));
/// assert!(Phase::Narrative < Phase::Production);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// Project state created
    Init,
    /// Character identities defined
    Identity,
    /// Screenplay written
    Narrative,
    /// Shot list planned and critiqued
    VisualPlanning,
    /// Shots rendered
    Production,
    /// Run finished
    Done,
}
