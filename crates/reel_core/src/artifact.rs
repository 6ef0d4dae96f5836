//! Documents passed between pipeline phases.
//!
//! The screenplay and shot list are open JSON objects whose schema belongs to
//! the prompt templates. Only the handful of keys the pipeline itself reads
//! get accessors here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded JSON object.
pub type JsonMap = serde_json::Map<String, Value>;

/// Screenplay produced by the narrative phase.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Screenplay(JsonMap);

impl Screenplay {
    /// Wrap a decoded object.
    pub fn new(map: JsonMap) -> Self {
        Self(map)
    }

    /// The screenplay title, or `Untitled` when absent or not a string.
    pub fn title(&self) -> &str {
        self.0
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("Untitled")
    }

    /// True when the narrative phase produced nothing usable.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Underlying object.
    pub fn as_map(&self) -> &JsonMap {
        &self.0
    }

    /// Serialize to a compact JSON string for prompt injection.
    pub fn to_json_string(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

impl From<JsonMap> for Screenplay {
    fn from(map: JsonMap) -> Self {
        Self(map)
    }
}

/// Shot list produced by the visual planning phase.
///
/// # Examples
///
/// ```
/// use reel_core::ShotList;
/// use serde_json::json;
///
/// let value = json!({"shots": [{"shot_id": "1A"}, {"shot_id": "1B"}]});
/// let list = ShotList::new(value.as_object().unwrap().clone());
/// assert_eq!(list.shots().len(), 2);
///
/// let empty = ShotList::default();
/// assert!(empty.shots().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShotList(JsonMap);

impl ShotList {
    /// Wrap a decoded object.
    pub fn new(map: JsonMap) -> Self {
        Self(map)
    }

    /// Shot documents, empty when `shots` is missing or not an array.
    pub fn shots(&self) -> &[Value] {
        self.0
            .get("shots")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True when there is no shot to produce.
    pub fn is_empty(&self) -> bool {
        self.shots().is_empty()
    }

    /// Underlying object.
    pub fn as_map(&self) -> &JsonMap {
        &self.0
    }

    /// Serialize to a compact JSON string for prompt injection.
    pub fn to_json_string(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

impl From<JsonMap> for ShotList {
    fn from(map: JsonMap) -> Self {
        Self(map)
    }
}

/// The critic's verdict on a shot list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Critique {
    /// `approved` or `rejected`
    #[serde(default)]
    pub status: Option<String>,
    /// Revision notes for the next planning pass
    #[serde(default)]
    pub feedback: Option<String>,
}

impl Critique {
    /// Read the verdict out of a decoded critic result.
    ///
    /// Non-string values are treated as absent.
    pub fn from_map(map: &JsonMap) -> Self {
        let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            status: text("status"),
            feedback: text("feedback"),
        }
    }

    /// True only for the literal status `approved`.
    pub fn is_approved(&self) -> bool {
        self.status.as_deref() == Some("approved")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> JsonMap {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_screenplay_title_defaults() {
        assert_eq!(Screenplay::default().title(), "Untitled");
        assert_eq!(Screenplay::new(map(json!({"title": 7}))).title(), "Untitled");
        assert_eq!(
            Screenplay::new(map(json!({"title": "Rain City"}))).title(),
            "Rain City"
        );
    }

    #[test]
    fn test_shot_list_ignores_non_array_shots() {
        let list = ShotList::new(map(json!({"shots": "none"})));
        assert!(list.is_empty());
    }

    #[test]
    fn test_critique_approval_is_exact() {
        let approved = Critique::from_map(&map(json!({"status": "approved"})));
        assert!(approved.is_approved());

        let shouting = Critique::from_map(&map(json!({"status": "APPROVED"})));
        assert!(!shouting.is_approved());

        let rejected = Critique::from_map(&map(json!({"status": "rejected", "feedback": "More rain"})));
        assert!(!rejected.is_approved());
        assert_eq!(rejected.feedback.as_deref(), Some("More rain"));

        assert!(!Critique::from_map(&JsonMap::new()).is_approved());
    }

    #[test]
    fn test_artifacts_serialize_transparently() {
        let list = ShotList::new(map(json!({"shots": [{"shot_id": "1A"}]})));
        let text = serde_json::to_string(&list).unwrap();
        assert_eq!(text, r#"{"shots":[{"shot_id":"1A"}]}"#);
    }
}
