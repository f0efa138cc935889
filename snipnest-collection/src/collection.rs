use std::collections::{BTreeSet, HashSet};

use snipnest_types::{
    CollectionError, CollectionResult, Snippet, SnippetId, SnippetPatch, tags,
};
use tracing::{debug, warn};

use crate::SortOrder;

/// The snippet collection view model.
///
/// Holds the records fetched from the backend plus the view parameters the
/// user controls (search text, language/tag filters, favorites toggle, sort
/// order), and derives the display list on demand. Exactly one consumer (the
/// UI event handler) mutates it, so there is no interior locking. The cache
/// is never the system of record; the backend is.
#[derive(Debug, Clone, Default)]
pub struct SnippetCollection {
    items: Vec<Snippet>,
    search_query: String,
    selected_languages: HashSet<String>,
    selected_tags: HashSet<String>,
    favourites_only: bool,
    sort_order: SortOrder,
}

impl SnippetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole cache with a fresh fetch-all result.
    ///
    /// Records whose id collides with one already ingested in this batch are
    /// dropped with a warning; the uniqueness invariant holds even against a
    /// misbehaving backend.
    pub fn replace_all(&mut self, snippets: Vec<Snippet>) {
        let mut items: Vec<Snippet> = Vec::with_capacity(snippets.len());
        let mut seen: HashSet<SnippetId> = HashSet::with_capacity(snippets.len());
        for snippet in snippets {
            if !seen.insert(snippet.id.clone()) {
                warn!("dropping duplicate snippet id {} from fetch", snippet.id);
                continue;
            }
            items.push(snippet);
        }
        debug!("cache replaced with {} snippets", items.len());
        self.items = items;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &SnippetId) -> Option<&Snippet> {
        self.items.iter().find(|s| &s.id == id)
    }

    /// Insert a record confirmed by the backend.
    pub fn apply_create(&mut self, snippet: Snippet) -> CollectionResult<()> {
        if self.position(&snippet.id).is_some() {
            return Err(CollectionError::DuplicateId(snippet.id));
        }
        debug!("created snippet {}", snippet.id);
        self.items.push(snippet);
        Ok(())
    }

    /// Replace a record's mutable fields with the patch's values.
    pub fn apply_edit(&mut self, id: &SnippetId, patch: SnippetPatch) -> CollectionResult<()> {
        let Some(idx) = self.position(id) else {
            return Err(CollectionError::NotFound(id.clone()));
        };
        let snippet = &mut self.items[idx];
        snippet.title = patch.title;
        snippet.content = patch.content;
        snippet.language = patch.language;
        snippet.tags = tags::clean_tags(patch.tags);
        snippet.favourite = patch.favourite;
        snippet.is_public = patch.is_public;
        debug!("edited snippet {id}");
        Ok(())
    }

    /// Remove a record, returning it.
    pub fn apply_delete(&mut self, id: &SnippetId) -> CollectionResult<Snippet> {
        let Some(idx) = self.position(id) else {
            return Err(CollectionError::NotFound(id.clone()));
        };
        debug!("deleted snippet {id}");
        Ok(self.items.remove(idx))
    }

    /// Flip a record's favourite flag, returning the new value.
    ///
    /// Convenience over [`Self::apply_edit`]; not a distinct state transition.
    pub fn toggle_favourite(&mut self, id: &SnippetId) -> CollectionResult<bool> {
        let Some(idx) = self.position(id) else {
            return Err(CollectionError::NotFound(id.clone()));
        };
        let snippet = &mut self.items[idx];
        snippet.favourite = !snippet.favourite;
        Ok(snippet.favourite)
    }

    /// Derive the filtered, sorted list to render.
    ///
    /// Pipeline, in fixed order: favourites toggle, search text, language
    /// filter, tag filter, then a two-level sort (favourites ahead of
    /// non-favourites, `created_at` within each partition). Pure given the
    /// current state; the cache is not touched.
    pub fn visible(&self) -> Vec<Snippet> {
        let query = self.search_query.trim().to_lowercase();

        let mut visible: Vec<Snippet> = self
            .items
            .iter()
            .filter(|s| !self.favourites_only || s.favourite)
            .filter(|s| query.is_empty() || matches_search(s, &query))
            .filter(|s| {
                self.selected_languages.is_empty()
                    || self.selected_languages.contains(&s.language.to_lowercase())
            })
            .filter(|s| {
                self.selected_tags.is_empty()
                    || s.tags
                        .iter()
                        .any(|t| self.selected_tags.contains(&t.to_lowercase()))
            })
            .cloned()
            .collect();

        // Stable sort: ties within a partition keep cache order.
        visible.sort_by(|a, b| {
            b.favourite
                .cmp(&a.favourite)
                .then_with(|| match self.sort_order {
                    SortOrder::Descending => b.created_at.cmp(&a.created_at),
                    SortOrder::Ascending => a.created_at.cmp(&b.created_at),
                })
        });
        visible
    }

    /// Distinct lowercased languages across the whole cache, sorted.
    ///
    /// Computed over the cache, not the filtered view; the filter sidebar
    /// must keep showing a language while it is the active filter.
    pub fn all_languages(&self) -> Vec<String> {
        let set: BTreeSet<String> = self
            .items
            .iter()
            .map(|s| s.language.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        set.into_iter().collect()
    }

    /// Distinct lowercased tags across the whole cache, sorted.
    pub fn all_tags(&self) -> Vec<String> {
        let set: BTreeSet<String> = self
            .items
            .iter()
            .flat_map(|s| s.tags.iter())
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        set.into_iter().collect()
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_favourites_only(&mut self, on: bool) {
        self.favourites_only = on;
    }

    pub fn favourites_only(&self) -> bool {
        self.favourites_only
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    pub fn toggle_sort_order(&mut self) -> SortOrder {
        self.sort_order = self.sort_order.toggled();
        self.sort_order
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Check or uncheck a language in the filter sidebar.
    pub fn set_language_selected(&mut self, language: &str, selected: bool) {
        let key = language.trim().to_lowercase();
        if key.is_empty() {
            return;
        }
        if selected {
            self.selected_languages.insert(key);
        } else {
            self.selected_languages.remove(&key);
        }
    }

    /// Check or uncheck a tag in the filter sidebar.
    pub fn set_tag_selected(&mut self, tag: &str, selected: bool) {
        let key = tag.trim().to_lowercase();
        if key.is_empty() {
            return;
        }
        if selected {
            self.selected_tags.insert(key);
        } else {
            self.selected_tags.remove(&key);
        }
    }

    pub fn selected_languages(&self) -> &HashSet<String> {
        &self.selected_languages
    }

    pub fn selected_tags(&self) -> &HashSet<String> {
        &self.selected_tags
    }

    /// Drop the language and tag filters. Search text and the favourites
    /// toggle are separate controls and stay as they are.
    pub fn clear_filters(&mut self) {
        self.selected_languages.clear();
        self.selected_tags.clear();
    }

    fn position(&self, id: &SnippetId) -> Option<usize> {
        self.items.iter().position(|s| &s.id == id)
    }
}

/// Case-insensitive substring match over title, content, language and tags.
/// `query` must already be trimmed and lowercased.
fn matches_search(snippet: &Snippet, query: &str) -> bool {
    snippet.title.to_lowercase().contains(query)
        || snippet.content.to_lowercase().contains(query)
        || snippet.language.to_lowercase().contains(query)
        || snippet.tags.iter().any(|t| t.to_lowercase().contains(query))
}
