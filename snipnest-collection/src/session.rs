use snipnest_types::{CollectionError, Snippet, SnippetDraft, SnippetId, SnippetPatch};
use tracing::debug;

use crate::api::{ApiError, SnippetApi};
use crate::collection::SnippetCollection;

/// One user's live view of their snippet library.
///
/// Owns the backend handle and the collection, and keeps the two consistent:
/// every mutation goes to the backend first and is applied locally only once
/// confirmed. Errors, including rate limiting, pass through to the caller
/// untouched; presenting them to the user happens a layer up.
#[derive(Debug)]
pub struct SnippetSession<A: SnippetApi> {
    api: A,
    collection: SnippetCollection,
}

impl<A: SnippetApi> SnippetSession<A> {
    pub fn new(api: A) -> Self {
        SnippetSession {
            api,
            collection: SnippetCollection::new(),
        }
    }

    pub fn collection(&self) -> &SnippetCollection {
        &self.collection
    }

    /// Mutable access for the view-parameter setters (search, filters, sort).
    pub fn collection_mut(&mut self) -> &mut SnippetCollection {
        &mut self.collection
    }

    /// The backend handle, e.g. to refresh credentials between calls.
    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    /// Fetch everything and replace the cache wholesale. Returns the number
    /// of cached records.
    pub fn refresh(&mut self) -> Result<usize, ApiError> {
        let raw = self.api.fetch_snippets()?;
        let snippets: Vec<Snippet> = raw.into_iter().map(Snippet::from).collect();
        debug!("refresh fetched {} snippets", snippets.len());
        self.collection.replace_all(snippets);
        Ok(self.collection.len())
    }

    /// Create a snippet and ingest the confirmed record. Returns the
    /// server-assigned id.
    pub fn create(&mut self, draft: SnippetDraft) -> Result<SnippetId, ApiError> {
        let raw = self.api.create_snippet(&draft)?;
        let snippet = Snippet::from(raw);
        let id = snippet.id.clone();
        self.collection.apply_create(snippet)?;
        Ok(id)
    }

    pub fn edit(&mut self, id: &SnippetId, patch: SnippetPatch) -> Result<(), ApiError> {
        self.api.update_snippet(id, &patch)?;
        self.collection.apply_edit(id, patch)?;
        Ok(())
    }

    /// Delete a snippet. A record already gone locally after the backend
    /// confirmed the delete (delete-after-delete) is a no-op success.
    pub fn delete(&mut self, id: &SnippetId) -> Result<(), ApiError> {
        self.api.delete_snippet(id)?;
        match self.collection.apply_delete(id) {
            Ok(_) => Ok(()),
            Err(CollectionError::NotFound(_)) => {
                debug!("delete {id}: already absent locally");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Flip a snippet's favourite flag. Returns the new value.
    pub fn toggle_favourite(&mut self, id: &SnippetId) -> Result<bool, ApiError> {
        let current = self
            .collection
            .get(id)
            .ok_or_else(|| CollectionError::NotFound(id.clone()))?;
        let next = !current.favourite;
        self.api.set_favourite(id, next)?;
        self.collection.toggle_favourite(id)?;
        Ok(next)
    }
}
