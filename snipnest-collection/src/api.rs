use snipnest_types::{CollectionError, RawSnippet, SnippetDraft, SnippetId, SnippetPatch};
use thiserror::Error;

/// Failure surface of the snippet backend as seen by the client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend throttled the request. Surface the wait to the user;
    /// retrying is not this layer's job.
    #[error("rate limited, retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },

    /// The auth token is no longer valid; the user must log in again.
    #[error("session expired")]
    AuthExpired,

    #[error("request failed: {0}")]
    Request(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error(transparent)]
    Collection(#[from] CollectionError),
}

/// The REST backend, specified as an interface only.
///
/// Implementations own transport, credentials and retry policy; none of that
/// leaks past this trait. Tests drive the session with an in-memory
/// implementation.
pub trait SnippetApi {
    /// Fetch every snippet owned by the current user, in wire form.
    fn fetch_snippets(&mut self) -> Result<Vec<RawSnippet>, ApiError>;

    /// Create a snippet. The backend returns the stored record with its
    /// assigned id and creation time.
    fn create_snippet(&mut self, draft: &SnippetDraft) -> Result<RawSnippet, ApiError>;

    /// Replace a snippet's mutable fields.
    fn update_snippet(&mut self, id: &SnippetId, patch: &SnippetPatch) -> Result<(), ApiError>;

    fn delete_snippet(&mut self, id: &SnippetId) -> Result<(), ApiError>;

    fn set_favourite(&mut self, id: &SnippetId, favourite: bool) -> Result<(), ApiError>;
}
