//! Tweak catalog model
//!
//! A catalog is an ordered list of categories, each owning an ordered list of
//! collections, each owning an ordered list of tweaks. The structure is fixed
//! once the catalog is built; only tweak values change during a session.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::catalog::CatalogError;

/// Callback run when an action tweak is selected
#[derive(Clone)]
pub struct TweakAction(Arc<dyn Fn() + Send + Sync>);

impl TweakAction {
    pub fn new(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// Action declared without a callback; selecting it only logs a warning
    pub fn unbound(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self::new(move || {
            tracing::warn!("action tweak {} has no callback bound", identifier);
        })
    }

    pub fn invoke(&self) {
        (self.0)()
    }
}

impl fmt::Debug for TweakAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TweakAction(..)")
    }
}

impl PartialEq for TweakAction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Numeric value with optional bounds and step
#[derive(Debug, Clone, PartialEq)]
pub struct NumberValue {
    pub value: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

impl NumberValue {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            min: None,
            max: None,
            step: None,
        }
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Clamp a candidate value into this number's bounds
    pub fn clamp(&self, candidate: f64) -> f64 {
        let mut value = candidate;
        if let Some(min) = self.min {
            value = value.max(min);
        }
        if let Some(max) = self.max {
            value = value.min(max);
        }
        value
    }
}

/// One value out of a fixed list of allowed choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceValue {
    pub selected: String,
    pub choices: Vec<String>,
}

impl ChoiceValue {
    pub fn new(selected: impl Into<String>, choices: Vec<String>) -> Self {
        Self {
            selected: selected.into(),
            choices,
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.choices.iter().position(|c| c == &self.selected)
    }
}

/// The value a tweak holds, by kind
#[derive(Debug, Clone, PartialEq)]
pub enum TweakValue {
    Bool(bool),
    Number(NumberValue),
    Text(String),
    Choice(ChoiceValue),
    /// No stored value, only a callback
    Action(TweakAction),
    /// Declared with a kind this browser does not know how to handle
    Unrecognized { kind: String },
}

/// Discriminant of [`TweakValue`], used in logs and errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Number,
    Text,
    Choice,
    Action,
    Unrecognized,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::Text => "string",
            ValueKind::Choice => "choice",
            ValueKind::Action => "action",
            ValueKind::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TweakValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            TweakValue::Bool(_) => ValueKind::Bool,
            TweakValue::Number(_) => ValueKind::Number,
            TweakValue::Text(_) => ValueKind::Text,
            TweakValue::Choice(_) => ValueKind::Choice,
            TweakValue::Action(_) => ValueKind::Action,
            TweakValue::Unrecognized { .. } => ValueKind::Unrecognized,
        }
    }

    /// Short human-readable form of the current value
    pub fn display_value(&self) -> String {
        match self {
            TweakValue::Bool(b) => b.to_string(),
            TweakValue::Number(n) => n.value.to_string(),
            TweakValue::Text(s) => s.clone(),
            TweakValue::Choice(c) => c.selected.clone(),
            TweakValue::Action(_) => String::new(),
            TweakValue::Unrecognized { kind } => format!("<{kind}>"),
        }
    }
}

/// A single configurable leaf entry
#[derive(Debug, Clone, PartialEq)]
pub struct Tweak {
    /// Stable identifier, unique within the catalog
    pub identifier: String,
    /// Display name
    pub name: String,
    /// Current value
    pub value: TweakValue,
    /// Value the tweak was built with (for reset); `None` for actions
    pub default: Option<TweakValue>,
}

impl Tweak {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>, value: TweakValue) -> Self {
        let default = match &value {
            TweakValue::Action(_) | TweakValue::Unrecognized { .. } => None,
            other => Some(other.clone()),
        };
        Self {
            identifier: identifier.into(),
            name: name.into(),
            value,
            default,
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    pub fn is_modified(&self) -> bool {
        match &self.default {
            Some(default) => default != &self.value,
            None => false,
        }
    }

    /// Restore the build-time value. Returns true if anything changed.
    pub fn reset_to_default(&mut self) -> bool {
        match &self.default {
            Some(default) if default != &self.value => {
                self.value = default.clone();
                true
            }
            _ => false,
        }
    }
}

/// Named grouping of tweaks inside a category
#[derive(Debug, Clone, PartialEq)]
pub struct TweakCollection {
    pub name: String,
    pub tweaks: Vec<Tweak>,
}

impl TweakCollection {
    pub fn new(name: impl Into<String>, tweaks: Vec<Tweak>) -> Self {
        Self {
            name: name.into(),
            tweaks,
        }
    }
}

/// Named top-level grouping of collections
#[derive(Debug, Clone, PartialEq)]
pub struct TweakCategory {
    pub name: String,
    pub collections: Vec<TweakCollection>,
}

impl TweakCategory {
    pub fn new(name: impl Into<String>, collections: Vec<TweakCollection>) -> Self {
        Self {
            name: name.into(),
            collections,
        }
    }

    pub fn collection(&self, name: &str) -> Option<&TweakCollection> {
        self.collections.iter().find(|c| c.name == name)
    }
}

/// The full tree of categories
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TweakCatalog {
    categories: Vec<TweakCategory>,
}

impl TweakCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category, rejecting duplicate names and duplicate identifiers
    pub fn add_category(&mut self, category: TweakCategory) -> Result<(), CatalogError> {
        if self.category(&category.name).is_some() {
            return Err(CatalogError::DuplicateCategory(category.name));
        }
        let mut seen: HashSet<&str> = self.tweaks().map(|t| t.identifier.as_str()).collect();
        for tweak in category.collections.iter().flat_map(|c| c.tweaks.iter()) {
            if !seen.insert(tweak.identifier.as_str()) {
                return Err(CatalogError::DuplicateIdentifier(tweak.identifier.clone()));
            }
        }
        self.categories.push(category);
        Ok(())
    }

    pub fn categories(&self) -> &[TweakCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&TweakCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn tweaks(&self) -> impl Iterator<Item = &Tweak> {
        self.categories
            .iter()
            .flat_map(|cat| cat.collections.iter())
            .flat_map(|col| col.tweaks.iter())
    }

    pub fn tweaks_mut(&mut self) -> impl Iterator<Item = &mut Tweak> {
        self.categories
            .iter_mut()
            .flat_map(|cat| cat.collections.iter_mut())
            .flat_map(|col| col.tweaks.iter_mut())
    }

    pub fn tweak_by_identifier(&self, identifier: &str) -> Option<&Tweak> {
        self.tweaks().find(|t| t.identifier == identifier)
    }

    pub fn tweak_by_identifier_mut(&mut self, identifier: &str) -> Option<&mut Tweak> {
        self.tweaks_mut().find(|t| t.identifier == identifier)
    }

    /// Tweak at a position in the tree
    pub fn tweak_at_mut(
        &mut self,
        category_index: usize,
        collection_index: usize,
        tweak_index: usize,
    ) -> Option<&mut Tweak> {
        self.categories
            .get_mut(category_index)?
            .collections
            .get_mut(collection_index)?
            .tweaks
            .get_mut(tweak_index)
    }

    /// Attach a callback to an action tweak
    pub fn bind_action(
        &mut self,
        identifier: &str,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> Result<(), CatalogError> {
        let tweak = self
            .tweak_by_identifier_mut(identifier)
            .ok_or_else(|| CatalogError::UnknownTweak(identifier.to_string()))?;
        match &mut tweak.value {
            TweakValue::Action(action) => {
                *action = TweakAction::new(callback);
                Ok(())
            }
            other => Err(CatalogError::NotAnAction {
                identifier: identifier.to_string(),
                kind: other.kind(),
            }),
        }
    }

    /// Tweaks whose value differs from the one they were built with
    pub fn modified_tweaks(&self) -> impl Iterator<Item = &Tweak> {
        self.tweaks().filter(|t| t.is_modified())
    }

    /// Reset every tweak to its default. Returns how many changed.
    pub fn reset_to_defaults(&mut self) -> usize {
        self.tweaks_mut()
            .map(|t| t.reset_to_default())
            .filter(|changed| *changed)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_catalog() -> TweakCatalog {
        let mut catalog = TweakCatalog::new();
        catalog
            .add_category(TweakCategory::new(
                "Networking",
                vec![TweakCollection::new(
                    "Network",
                    vec![
                        Tweak::new("net.timeout", "Timeout", TweakValue::Number(NumberValue::new(30.0))),
                        Tweak::new("net.verbose", "Verbose", TweakValue::Bool(false)),
                        Tweak::new(
                            "net.flush",
                            "Flush Cache",
                            TweakValue::Action(TweakAction::unbound("net.flush")),
                        ),
                    ],
                )],
            ))
            .unwrap();
        catalog
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let mut catalog = sample_catalog();
        let err = catalog
            .add_category(TweakCategory::new("Networking", vec![]))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCategory(name) if name == "Networking"));
        assert_eq!(catalog.categories().len(), 1);
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let mut catalog = sample_catalog();
        let err = catalog
            .add_category(TweakCategory::new(
                "Other",
                vec![TweakCollection::new(
                    "Misc",
                    vec![Tweak::new("net.verbose", "Verbose", TweakValue::Bool(true))],
                )],
            ))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateIdentifier(id) if id == "net.verbose"));
    }

    #[test]
    fn test_modified_and_reset() {
        let mut catalog = sample_catalog();
        assert_eq!(catalog.modified_tweaks().count(), 0);

        let tweak = catalog.tweak_by_identifier_mut("net.verbose").unwrap();
        tweak.value = TweakValue::Bool(true);
        assert!(tweak.is_modified());
        assert_eq!(catalog.modified_tweaks().count(), 1);

        assert_eq!(catalog.reset_to_defaults(), 1);
        assert_eq!(
            catalog.tweak_by_identifier("net.verbose").unwrap().value,
            TweakValue::Bool(false)
        );
    }

    #[test]
    fn test_actions_have_no_default() {
        let catalog = sample_catalog();
        let flush = catalog.tweak_by_identifier("net.flush").unwrap();
        assert!(flush.default.is_none());
        assert!(!flush.is_modified());
    }

    #[test]
    fn test_bind_action() {
        let mut catalog = sample_catalog();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        catalog
            .bind_action("net.flush", move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        if let TweakValue::Action(action) = &catalog.tweak_by_identifier("net.flush").unwrap().value {
            action.invoke();
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // Binding a non-action is refused
        let err = catalog.bind_action("net.verbose", || {}).unwrap_err();
        assert!(matches!(err, CatalogError::NotAnAction { kind: ValueKind::Bool, .. }));
    }

    #[test]
    fn test_number_clamp() {
        let number = NumberValue::new(5.0).with_range(Some(1.0), Some(8.0));
        assert_eq!(number.clamp(0.0), 1.0);
        assert_eq!(number.clamp(12.0), 8.0);
        assert_eq!(number.clamp(4.5), 4.5);
        assert_eq!(NumberValue::new(0.0).clamp(-3.0), -3.0);
    }
}
