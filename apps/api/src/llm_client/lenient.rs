//! Tolerant field access over AI replies decoded as `serde_json::Value`.
//!
//! Models routinely emit `null` for empty fields, numbers where text was asked
//! for, and a bare string where a list was asked for. These helpers read what
//! is usable and fall back to empty values for the rest.

use serde_json::{Map, Value};

use super::strip_json_fences;

pub type Object = Map<String, Value>;

/// Text of a scalar value, trimmed. `null`, blanks and containers yield `None`.
pub fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

pub fn text(object: &Object, key: &str) -> Option<String> {
    object.get(key).and_then(value_text)
}

/// List of texts. A lone string becomes a one-item list.
pub fn text_list(object: &Object, key: &str) -> Vec<String> {
    match object.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(value_text).collect(),
        Some(other) => value_text(other).into_iter().collect(),
        None => Vec::new(),
    }
}

/// The object entries of a list field; anything else in the list is skipped.
pub fn object_list<'a>(object: &'a Object, key: &str) -> Vec<&'a Object> {
    match object.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
        _ => Vec::new(),
    }
}

/// Decodes a reply as one JSON object. Fences are stripped first. When the
/// whole reply does not parse, the span from the first `{` to the last `}`
/// is tried, which recovers objects wrapped in prose.
pub fn extract_object(reply: &str) -> Option<Object> {
    let body = strip_json_fences(reply);
    if let Ok(Value::Object(object)) = serde_json::from_str(body) {
        return Some(object);
    }

    let start = body.find('{')?;
    let end = body.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str(&body[start..=end]) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}
