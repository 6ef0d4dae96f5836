//! Production results for individual shots.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Outcome of producing one shot.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShotStatus {
    /// Anchor frame and clip were generated
    Success,
    /// Anchor frame could not be generated
    Failed,
}

/// What the production backend made for one shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ShotResult {
    /// Overall outcome
    status: ShotStatus,
    /// Path of the generated still
    anchor_frame: Option<PathBuf>,
    /// Path of the generated clip
    video_clip: Option<PathBuf>,
    /// The shot document this result belongs to
    shot_metadata: Value,
}

impl ShotResult {
    /// A successful result with both media paths.
    pub fn success(anchor_frame: PathBuf, video_clip: PathBuf, shot_metadata: Value) -> Self {
        Self {
            status: ShotStatus::Success,
            anchor_frame: Some(anchor_frame),
            video_clip: Some(video_clip),
            shot_metadata,
        }
    }

    /// A successful result whose motion clip could not be generated.
    pub fn anchor_only(anchor_frame: PathBuf, shot_metadata: Value) -> Self {
        Self {
            status: ShotStatus::Success,
            anchor_frame: Some(anchor_frame),
            video_clip: None,
            shot_metadata,
        }
    }

    /// A failed result carrying only the shot document.
    pub fn failed(shot_metadata: Value) -> Self {
        Self {
            status: ShotStatus::Failed,
            anchor_frame: None,
            video_clip: None,
            shot_metadata,
        }
    }

    /// True when the shot was produced.
    pub fn is_success(&self) -> bool {
        self.status == ShotStatus::Success
    }

    /// Identifier of the shot this result belongs to.
    pub fn shot_id(&self) -> String {
        shot_id(&self.shot_metadata)
    }
}

/// Read a shot's identifier, accepting string or numeric ids.
///
/// Returns `unknown` when the document carries no usable `shot_id`.
///
/// # Examples
///
/// ```
/// use reel_core::shot_id;
/// use serde_json::json;
///
/// assert_eq!(shot_id(&json!({"shot_id": "1A"})), "1A");
/// assert_eq!(shot_id(&json!({"shot_id": 3})), "3");
/// assert_eq!(shot_id(&json!({})), "unknown");
/// ```
pub fn shot_id(shot: &Value) -> String {
    match shot.get("shot_id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failed_result_has_no_paths() {
        let result = ShotResult::failed(json!({"shot_id": "2"}));
        assert!(!result.is_success());
        assert!(result.anchor_frame().is_none());
        assert!(result.video_clip().is_none());
        assert_eq!(result.shot_id(), "2");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let result = ShotResult::success(
            PathBuf::from("out/shots/shot_1_anchor.png"),
            PathBuf::from("out/shots/shot_1_clip.mp4"),
            json!({"shot_id": "1"}),
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(ShotStatus::Failed.to_string(), "failed");
    }
}
