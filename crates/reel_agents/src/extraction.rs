//! Recovering JSON objects from generated text.
//!
//! Models often wrap their answer in markdown fences or surround it with
//! prose. The parser strips the fences, keeps the span from the first `{`
//! to the last `}` and decodes that.

use reel_core::JsonMap;
use serde_json::Value;

/// Decode the JSON object embedded in a model response.
///
/// Returns an empty map when no object can be decoded; empty means "no
/// usable result" to every caller.
///
/// # Examples
///
/// ```
/// use reel_agents::parse_json_object;
///
/// let response = "Sure! Here it is:\n```json\n{\"status\": \"approved\"}\n```\nEnjoy.";
/// let map = parse_json_object(response);
/// assert_eq!(map["status"], "approved");
///
/// assert!(parse_json_object("no json here").is_empty());
/// ```
pub fn parse_json_object(response: &str) -> JsonMap {
    let cleaned = strip_code_fences(response);
    let candidate = slice_object(&cleaned).trim();

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            tracing::error!(kind = value_kind(&other), "Response JSON is not an object");
            JsonMap::new()
        }
        Err(e) => {
            let preview: String = candidate.chars().take(100).collect();
            tracing::error!(error = %e, json_preview = %preview, "Failed to parse JSON");
            JsonMap::new()
        }
    }
}

/// Remove every ```` ```json ```` marker (with trailing whitespace) and every
/// bare ```` ``` ```` fence.
fn strip_code_fences(response: &str) -> String {
    let mut cleaned = String::with_capacity(response.len());
    let mut rest = response;
    while let Some(pos) = rest.find("```json") {
        cleaned.push_str(&rest[..pos]);
        rest = rest[pos + "```json".len()..].trim_start();
    }
    cleaned.push_str(rest);
    cleaned.replace("```", "")
}

/// The span from the first `{` to the last `}`, or the whole text when
/// there is no such span.
fn slice_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start <= end => &text[start..=end],
        _ => text,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_and_bare_decode_identically() {
        let bare = r#"{"shots": [{"shot_id": 1, "lens_mm": 50}]}"#;
        let wrapped = format!(
            "Here's the JSON you requested:\n\n```json\n{}\n```\n\nHope this helps!",
            bare
        );
        assert_eq!(parse_json_object(&wrapped), parse_json_object(bare));
        assert!(!parse_json_object(bare).is_empty());
    }

    #[test]
    fn test_fence_without_language() {
        let response = "```\n{\"status\": \"rejected\", \"feedback\": \"Wider lens\"}\n```";
        let map = parse_json_object(response);
        assert_eq!(map["feedback"], "Wider lens");
    }

    #[test]
    fn test_nested_braces_keep_outer_object() {
        let response = r#"Result: {"lighting": {"key": "hard_sun"}} done"#;
        let map = parse_json_object(response);
        assert_eq!(map["lighting"]["key"], "hard_sun");
    }

    #[test]
    fn test_invalid_json_is_empty() {
        assert!(parse_json_object("{not: valid}").is_empty());
        assert!(parse_json_object("").is_empty());
    }

    #[test]
    fn test_non_object_is_empty() {
        assert!(parse_json_object("[1, 2, 3]").is_empty());
        assert!(parse_json_object("42").is_empty());
    }

    #[test]
    fn test_brace_order_reversed_is_empty() {
        assert!(parse_json_object("} oops {").is_empty());
    }
}
