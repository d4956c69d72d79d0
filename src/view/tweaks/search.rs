//! Search and filtering of the tweak tree
//!
//! Matching is a case-insensitive contiguous substring test. Filtering walks
//! categories, then collections, in declared order and returns a flat list of
//! the collections relevant to the query.

use serde::{Deserialize, Serialize};

use super::model::{Tweak, TweakCategory, TweakCollection};

/// What a search query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Match collection names; matching collections keep all their tweaks
    Collection,
    /// Match tweak names; collections keep only their matching tweaks
    #[default]
    Tweak,
}

/// A tweak retained by the filter, with its position in its collection
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredTweak<'a> {
    pub index: usize,
    pub tweak: &'a Tweak,
}

/// A collection retained by the filter
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredCollection<'a> {
    pub category_index: usize,
    pub collection_index: usize,
    pub collection: &'a TweakCollection,
    /// Retained tweaks, in original order
    pub tweaks: Vec<FilteredTweak<'a>>,
}

impl<'a> FilteredCollection<'a> {
    pub fn name(&self) -> &'a str {
        &self.collection.name
    }

    /// Names of the retained tweaks
    pub fn tweak_names(&self) -> Vec<&'a str> {
        self.tweaks.iter().map(|t| t.tweak.name.as_str()).collect()
    }
}

/// Check whether `name` matches `query`.
///
/// An empty query matches everything. Otherwise the lower-cased query must
/// occur somewhere in the lower-cased name. The query is not trimmed.
pub fn matches(name: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&query.to_lowercase())
}

/// Same as [`matches`] for a query that is already lower-cased
fn matches_lowered(name: &str, lowered_query: &str) -> bool {
    lowered_query.is_empty() || name.to_lowercase().contains(lowered_query)
}

fn all_tweaks(collection: &TweakCollection) -> Vec<FilteredTweak<'_>> {
    collection
        .tweaks
        .iter()
        .enumerate()
        .map(|(index, tweak)| FilteredTweak { index, tweak })
        .collect()
}

/// Filter the catalog down to the collections relevant to `query`.
///
/// With an empty query every collection is returned with all of its tweaks,
/// whatever the scope.
pub fn filtered_collections<'a>(
    categories: &'a [TweakCategory],
    query: &str,
    scope: SearchScope,
) -> Vec<FilteredCollection<'a>> {
    let lowered = query.to_lowercase();
    let mut results = Vec::new();

    for (category_index, category) in categories.iter().enumerate() {
        for (collection_index, collection) in category.collections.iter().enumerate() {
            let tweaks = if lowered.is_empty() {
                all_tweaks(collection)
            } else {
                match scope {
                    SearchScope::Collection => {
                        if !matches_lowered(&collection.name, &lowered) {
                            continue;
                        }
                        all_tweaks(collection)
                    }
                    SearchScope::Tweak => {
                        let matching: Vec<_> = collection
                            .tweaks
                            .iter()
                            .enumerate()
                            .filter(|(_, tweak)| matches_lowered(&tweak.name, &lowered))
                            .map(|(index, tweak)| FilteredTweak { index, tweak })
                            .collect();
                        if matching.is_empty() {
                            continue;
                        }
                        matching
                    }
                }
            };

            results.push(FilteredCollection {
                category_index,
                collection_index,
                collection,
                tweaks,
            });
        }
    }

    tracing::trace!(
        "filtered tweaks for {:?} ({:?}): {} collections",
        query,
        scope,
        results.len()
    );
    results
}
