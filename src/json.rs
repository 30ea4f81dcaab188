//! Nested-JSON detection
//!
//! Decides whether a string value holds a JSON object or array worth
//! expanding. The size cap bounds the cost of the parse attempt.

use serde_json::Value;

/// Longest payload (in characters, after trimming) that will be parsed
pub const MAX_NESTED_JSON_LEN: usize = 100_000;

/// Check whether `value` is a JSON object or array.
///
/// Primitive JSON (`42`, `true`, `"text"`) does not count.
pub fn is_nested_json(value: &str) -> bool {
    parse_nested_json(value).is_some()
}

/// Parse `value` as a JSON object or array.
///
/// Returns `None` for empty input, input over [`MAX_NESTED_JSON_LEN`]
/// characters, input not starting with `{` or `[`, invalid JSON, and
/// JSON that is not an object or array.
pub fn parse_nested_json(value: &str) -> Option<Value> {
    let trimmed = value.trim();
    if trimmed.is_empty() || exceeds_limit(trimmed) {
        return None;
    }
    if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(parsed @ (Value::Object(_) | Value::Array(_))) => Some(parsed),
        _ => None,
    }
}

/// Length check that only counts characters when the byte length is over
fn exceeds_limit(text: &str) -> bool {
    text.len() > MAX_NESTED_JSON_LEN && text.chars().count() > MAX_NESTED_JSON_LEN
}
