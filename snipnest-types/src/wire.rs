//! Wire format for snippet records.
//!
//! The backend serves JSON whose field shapes drifted across deployments:
//! `tags` in three serialized forms and `created_at` with varying precision.
//! Decoding is tolerant: a record is only rejected when its `id` is missing
//! or unusable; every other field degrades to a usable default.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::snippet::{Snippet, SnippetId};
use crate::tags::normalize_tags;

/// A snippet record as served by the backend, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSnippet {
    pub id: SnippetId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub tags: Value,
    #[serde(default)]
    pub favourite: bool,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Creation time as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Text(String),
    EpochSecs(i64),
}

impl From<RawSnippet> for Snippet {
    fn from(raw: RawSnippet) -> Self {
        let created_at = match &raw.created_at {
            Some(Timestamp::Text(text)) => parse_timestamp(text).unwrap_or_else(|| {
                warn!("snippet {}: unparseable created_at {text:?}", raw.id);
                DateTime::UNIX_EPOCH
            }),
            Some(Timestamp::EpochSecs(secs)) => {
                DateTime::from_timestamp(*secs, 0).unwrap_or(DateTime::UNIX_EPOCH)
            }
            None => DateTime::UNIX_EPOCH,
        };

        Snippet {
            tags: normalize_tags(&raw.tags),
            id: raw.id,
            title: raw.title,
            content: raw.content,
            language: raw.language,
            favourite: raw.favourite,
            is_public: raw.is_public,
            created_at,
        }
    }
}

/// Parse an upstream timestamp string into a UTC instant.
///
/// Tries RFC 3339 first, then the naive ISO and SQL forms, then a bare date
/// (taken as midnight UTC). Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let text = raw.trim();

    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(t.and_utc());
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(t.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(t) = d.and_hms_opt(0, 0, 0) {
            return Some(t.and_utc());
        }
    }

    None
}

/// Decode a fetch-all response body into raw records.
pub fn decode_snippets(body: &str) -> serde_json::Result<Vec<RawSnippet>> {
    serde_json::from_str(body)
}
