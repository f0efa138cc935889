use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Snippet identifier as assigned by the backend.
///
/// The backend serves integer ids, but shared/public records may carry opaque
/// string ids, so both wire shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnippetId {
    Int(i64),
    Text(String),
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnippetId::Int(n) => write!(f, "{n}"),
            SnippetId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for SnippetId {
    fn from(id: i64) -> Self {
        SnippetId::Int(id)
    }
}

impl From<&str> for SnippetId {
    fn from(id: &str) -> Self {
        SnippetId::Text(id.to_string())
    }
}

impl From<String> for SnippetId {
    fn from(id: String) -> Self {
        SnippetId::Text(id)
    }
}

/// A code snippet in canonical in-memory form.
///
/// `tags` is always an ordered list of non-empty strings here; the three wire
/// shapes are collapsed by [`crate::tags::normalize_tags`] at ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    pub language: String,
    pub tags: Vec<String>,
    pub favourite: bool,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a snippet. The backend assigns `id` and `created_at`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnippetDraft {
    pub title: String,
    pub content: String,
    pub language: String,
    pub tags: Vec<String>,
    pub favourite: bool,
    pub is_public: bool,
}

impl SnippetDraft {
    pub fn new(title: &str, content: &str, language: &str) -> Self {
        SnippetDraft {
            title: title.to_string(),
            content: content.to_string(),
            language: language.to_string(),
            tags: Vec::new(),
            favourite: false,
            is_public: false,
        }
    }
}

/// Replacement values for a snippet's mutable fields.
///
/// Edits are whole-field replacements, not merges: every mutable field carries
/// its post-edit value. `id` and `created_at` never change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetPatch {
    pub title: String,
    pub content: String,
    pub language: String,
    pub tags: Vec<String>,
    pub favourite: bool,
    pub is_public: bool,
}

impl From<&Snippet> for SnippetPatch {
    fn from(snippet: &Snippet) -> Self {
        SnippetPatch {
            title: snippet.title.clone(),
            content: snippet.content.clone(),
            language: snippet.language.clone(),
            tags: snippet.tags.clone(),
            favourite: snippet.favourite,
            is_public: snippet.is_public,
        }
    }
}
