//! Tweak browser module
//!
//! Searches a catalog of debug tweaks and decides what happens when one is
//! selected. Rendering and navigation belong to the host, which plugs in
//! through [`TweakPresenter`].
//!
//! ## Architecture
//!
//! - `model.rs` - Catalog tree and the tweak value kinds
//! - `catalog.rs` - JSON catalog declarations and validation
//! - `search.rs` - Name matching and filtering of the tree
//! - `selection.rs` - Dispatch of a selected tweak by value kind
//! - `detail.rs` - Detail screen state for number, string and choice tweaks
//! - `state.rs` - Browser state tying queries and row taps together

pub mod catalog;
pub mod detail;
pub mod model;
pub mod search;
pub mod selection;
pub mod state;

pub use catalog::{load_catalog, CatalogDecl, CatalogError};
pub use detail::{DetailEditorState, DetailError};
pub use model::{
    ChoiceValue, NumberValue, Tweak, TweakAction, TweakCatalog, TweakCategory, TweakCollection,
    TweakValue, ValueKind,
};
pub use search::{filtered_collections, matches, FilteredCollection, FilteredTweak, SearchScope};
pub use selection::{
    handle_selection, DetailRequest, DetailValue, NumberBounds, SelectionError, SelectionOutcome,
    TweakPresenter,
};
pub use state::{SearchResult, TweakBrowserState};
