//! Tag normalization.
//!
//! The backend has stored tags in three shapes over time: a native JSON list,
//! a JSON-encoded string, and a single raw string (sometimes a Postgres array
//! literal like `{a,b}`). Everything downstream expects one canonical shape,
//! so this module collapses all of them to an ordered list of non-empty tags
//! at the data boundary. Malformed input degrades, it never errors.

use serde_json::Value;
use tracing::warn;

/// Collapse any upstream tags value into an ordered list of clean tags.
///
/// Accepted shapes:
/// - a JSON array (string elements kept, other scalars rendered to text),
/// - a string holding a JSON array,
/// - any other string, with wrapping `{ } [ ] "` stripped and commas treated
///   as separators.
///
/// Idempotent: feeding the output back in (re-encoded as a JSON array) yields
/// the same list.
pub fn normalize_tags(raw: &Value) -> Vec<String> {
    match raw {
        Value::Null => Vec::new(),
        Value::Array(items) => from_array(items),
        Value::String(text) => from_text(text),
        other => {
            warn!("dropping tags with unexpected shape: {other}");
            Vec::new()
        }
    }
}

fn from_array(items: &[Value]) -> Vec<String> {
    let mut tags = Vec::new();
    for item in items {
        match item {
            Value::String(s) => push_clean(&mut tags, s),
            Value::Number(n) => push_clean(&mut tags, &n.to_string()),
            Value::Bool(b) => push_clean(&mut tags, &b.to_string()),
            other => warn!("dropping non-scalar tag entry: {other}"),
        }
    }
    tags
}

fn from_text(text: &str) -> Vec<String> {
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(text) {
        return from_array(&items);
    }

    // Raw string fallback: strip wrapping characters, split on commas.
    let stripped: String = text
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '{' | '}' | '"'))
        .collect();

    let mut tags = Vec::new();
    for part in stripped.split(',') {
        push_clean(&mut tags, part);
    }
    if tags.is_empty() && !text.trim().is_empty() {
        warn!("tags text {text:?} normalized to nothing");
    }
    tags
}

/// Clean a tag list coming from a form draft or edit patch.
pub fn clean_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags = Vec::new();
    for item in raw {
        push_clean(&mut tags, item.as_ref());
    }
    tags
}

fn push_clean(tags: &mut Vec<String>, raw: &str) {
    let tag = raw.trim();
    if !tag.is_empty() {
        tags.push(tag.to_string());
    }
}
