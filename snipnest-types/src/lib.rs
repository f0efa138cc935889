use thiserror::Error;

pub mod snippet;
pub mod tags;
pub mod wire;

pub use snippet::{Snippet, SnippetDraft, SnippetId, SnippetPatch};
pub use tags::normalize_tags;
pub use wire::RawSnippet;

/// Errors raised by cache mutations.
///
/// Both variants are local contract violations (the caller fed the cache an id
/// it should not have) and are surfaced as errors rather than swallowed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    #[error("snippet {0} already exists")]
    DuplicateId(SnippetId),

    #[error("snippet {0} not found")]
    NotFound(SnippetId),
}

pub type CollectionResult<T> = std::result::Result<T, CollectionError>;
