//! Tweak browser state
//!
//! Holds the catalog, the current search query and scope, and the filtered
//! rows derived from them. Query changes rebuild the rows; row taps are
//! routed to the selection dispatcher.

use super::detail::{DetailEditorState, DetailError};
use super::model::{Tweak, TweakCatalog};
use super::search::{filtered_collections, FilteredCollection, SearchScope};
use super::selection::{handle_selection, SelectionError, SelectionOutcome, TweakPresenter};
use crate::config::BrowserConfig;

/// Owned form of one filtered collection, as positions in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub category_index: usize,
    pub collection_index: usize,
    /// Positions of the retained tweaks inside the collection
    pub tweak_indices: Vec<usize>,
}

impl From<&FilteredCollection<'_>> for SearchResult {
    fn from(filtered: &FilteredCollection<'_>) -> Self {
        Self {
            category_index: filtered.category_index,
            collection_index: filtered.collection_index,
            tweak_indices: filtered.tweaks.iter().map(|t| t.index).collect(),
        }
    }
}

/// The state of the tweak browser
#[derive(Debug)]
pub struct TweakBrowserState {
    catalog: TweakCatalog,
    /// Current search query
    search_query: String,
    /// What the query is matched against
    scope: SearchScope,
    /// Current search results
    results: Vec<SearchResult>,
}

impl TweakBrowserState {
    pub fn new(catalog: TweakCatalog, scope: SearchScope) -> Self {
        let mut state = Self {
            catalog,
            search_query: String::new(),
            scope,
            results: Vec::new(),
        };
        state.refresh_results();
        state
    }

    pub fn with_config(catalog: TweakCatalog, config: &BrowserConfig) -> Self {
        Self::new(catalog, config.default_scope)
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn scope(&self) -> SearchScope {
        self.scope
    }

    pub fn catalog(&self) -> &TweakCatalog {
        &self.catalog
    }

    /// Current results as catalog positions
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Current results borrowing the catalog
    pub fn filtered(&self) -> Vec<FilteredCollection<'_>> {
        filtered_collections(self.catalog.categories(), &self.search_query, self.scope)
    }

    fn refresh_results(&mut self) {
        self.results = filtered_collections(self.catalog.categories(), &self.search_query, self.scope)
            .iter()
            .map(SearchResult::from)
            .collect();
    }

    /// Update search query and refresh results
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.refresh_results();
    }

    /// Add a character to the search query
    pub fn search_push_char(&mut self, c: char) {
        self.search_query.push(c);
        self.refresh_results();
    }

    /// Remove the last character from the search query
    pub fn search_pop_char(&mut self) {
        self.search_query.pop();
        self.refresh_results();
    }

    /// Clear the query, showing the whole catalog again
    pub fn cancel_search(&mut self) {
        self.search_query.clear();
        self.refresh_results();
    }

    pub fn set_scope(&mut self, scope: SearchScope) {
        if self.scope != scope {
            self.scope = scope;
            self.refresh_results();
        }
    }

    /// Tweak shown at a row of the current results
    pub fn tweak_at(&self, collection_row: usize, tweak_row: usize) -> Option<&Tweak> {
        let result = self.results.get(collection_row)?;
        let tweak_index = *result.tweak_indices.get(tweak_row)?;
        self.catalog
            .categories()
            .get(result.category_index)?
            .collections
            .get(result.collection_index)?
            .tweaks
            .get(tweak_index)
    }

    /// Handle a tap on a tweak row of the current results
    pub fn select_row(
        &mut self,
        collection_row: usize,
        tweak_row: usize,
        presenter: &mut dyn TweakPresenter,
    ) -> Result<SelectionOutcome, SelectionError> {
        let out_of_range = SelectionError::RowOutOfRange {
            collection_row,
            tweak_row,
        };
        let Some(result) = self.results.get(collection_row) else {
            return Err(out_of_range);
        };
        let Some(&tweak_index) = result.tweak_indices.get(tweak_row) else {
            return Err(out_of_range);
        };
        let (category_index, collection_index) = (result.category_index, result.collection_index);

        let tweak = self
            .catalog
            .tweak_at_mut(category_index, collection_index, tweak_index)
            .ok_or(out_of_range)?;
        handle_selection(tweak, presenter)
    }

    /// Handle a selection by tweak identifier, regardless of the current filter
    pub fn select_identifier(
        &mut self,
        identifier: &str,
        presenter: &mut dyn TweakPresenter,
    ) -> Option<Result<SelectionOutcome, SelectionError>> {
        let tweak = self.catalog.tweak_by_identifier_mut(identifier)?;
        Some(handle_selection(tweak, presenter))
    }

    /// Commit a detail editor to the tweak it was opened for
    pub fn apply_detail(&mut self, editor: &DetailEditorState) -> Result<(), DetailError> {
        let tweak = self
            .catalog
            .tweak_by_identifier_mut(&editor.identifier)
            .ok_or_else(|| DetailError::UnknownTweak(editor.identifier.clone()))?;
        editor.commit(tweak)
    }

    pub fn tweak_by_identifier(&self, identifier: &str) -> Option<&Tweak> {
        self.catalog.tweak_by_identifier(identifier)
    }

    /// Tweaks whose value differs from their default
    pub fn modified_tweaks(&self) -> Vec<&Tweak> {
        self.catalog.modified_tweaks().collect()
    }

    /// Reset every tweak to its default. Returns how many changed.
    pub fn reset_to_defaults(&mut self) -> usize {
        self.catalog.reset_to_defaults()
    }
}
