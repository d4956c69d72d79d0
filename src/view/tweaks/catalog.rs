//! Catalog declarations
//!
//! Catalogs are declared in JSON and built into a [`TweakCatalog`] when the
//! app is configured. A declaration only carries default values; current
//! values live in the built catalog for the duration of a session.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::{
    ChoiceValue, NumberValue, Tweak, TweakAction, TweakCatalog, TweakCategory, TweakCollection,
    TweakValue, ValueKind,
};

/// Errors raised while building or editing a catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate category '{0}'")]
    DuplicateCategory(String),

    #[error("duplicate tweak identifier '{0}'")]
    DuplicateIdentifier(String),

    #[error("tweak '{identifier}': invalid default {value} for kind {kind}")]
    InvalidDefault {
        identifier: String,
        kind: ValueKind,
        value: Value,
    },

    #[error("tweak '{identifier}': minimum {min} is greater than maximum {max}")]
    InvalidRange {
        identifier: String,
        min: f64,
        max: f64,
    },

    #[error("tweak '{identifier}': step {step} must be a positive number")]
    InvalidStep { identifier: String, step: f64 },

    #[error("no tweak with identifier '{0}'")]
    UnknownTweak(String),

    #[error("tweak '{identifier}' is a {kind}, not an action")]
    NotAnAction { identifier: String, kind: ValueKind },
}

/// Root of a catalog declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CatalogDecl {
    #[serde(default)]
    pub categories: Vec<CategoryDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryDecl {
    pub name: String,
    #[serde(default)]
    pub collections: Vec<CollectionDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CollectionDecl {
    pub name: String,
    #[serde(default)]
    pub tweaks: Vec<TweakDecl>,
}

/// A single tweak declaration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TweakDecl {
    /// Stable identifier; defaults to `category/collection/name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Display name
    pub name: String,

    /// Value kind: bool, number, string, choice or action
    pub kind: String,

    /// Default value, checked against the kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,

    /// Allowed values for choice tweaks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl CatalogDecl {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    /// Validate the declaration and build the catalog
    pub fn build(&self) -> Result<TweakCatalog, CatalogError> {
        let mut catalog = TweakCatalog::new();
        for category in &self.categories {
            let collections = category
                .collections
                .iter()
                .map(|collection| -> Result<TweakCollection, CatalogError> {
                    let tweaks = collection
                        .tweaks
                        .iter()
                        .map(|decl| build_tweak(&category.name, &collection.name, decl))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(TweakCollection::new(collection.name.clone(), tweaks))
                })
                .collect::<Result<Vec<_>, _>>()?;
            catalog.add_category(TweakCategory::new(category.name.clone(), collections))?;
        }
        tracing::debug!(
            "built tweak catalog: {} categories, {} tweaks",
            catalog.categories().len(),
            catalog.tweaks().count()
        );
        Ok(catalog)
    }
}

/// Build a catalog straight from a JSON file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<TweakCatalog, CatalogError> {
    CatalogDecl::load_from_file(path)?.build()
}

fn build_tweak(category: &str, collection: &str, decl: &TweakDecl) -> Result<Tweak, CatalogError> {
    let identifier = decl
        .identifier
        .clone()
        .unwrap_or_else(|| format!("{}/{}/{}", category, collection, decl.name));
    let value = build_value(&identifier, decl)?;
    Ok(Tweak::new(identifier, decl.name.clone(), value))
}

fn invalid_default(identifier: &str, kind: ValueKind, value: &Value) -> CatalogError {
    CatalogError::InvalidDefault {
        identifier: identifier.to_string(),
        kind,
        value: value.clone(),
    }
}

fn build_value(identifier: &str, decl: &TweakDecl) -> Result<TweakValue, CatalogError> {
    let default = decl.default.as_ref();
    let value = match decl.kind.as_str() {
        "bool" | "boolean" => match default {
            None => TweakValue::Bool(false),
            Some(Value::Bool(b)) => TweakValue::Bool(*b),
            Some(other) => return Err(invalid_default(identifier, ValueKind::Bool, other)),
        },
        "number" => {
            if let (Some(min), Some(max)) = (decl.min, decl.max) {
                if min > max {
                    return Err(CatalogError::InvalidRange {
                        identifier: identifier.to_string(),
                        min,
                        max,
                    });
                }
            }
            if let Some(step) = decl.step {
                if !(step.is_finite() && step > 0.0) {
                    return Err(CatalogError::InvalidStep {
                        identifier: identifier.to_string(),
                        step,
                    });
                }
            }
            let mut number = NumberValue::new(0.0).with_range(decl.min, decl.max);
            number.step = decl.step;
            number.value = match default {
                None => number.clamp(0.0),
                Some(v) => match v.as_f64() {
                    Some(n) if n.is_finite() => number.clamp(n),
                    _ => return Err(invalid_default(identifier, ValueKind::Number, v)),
                },
            };
            TweakValue::Number(number)
        }
        "string" | "text" => match default {
            None => TweakValue::Text(String::new()),
            Some(Value::String(s)) => TweakValue::Text(s.clone()),
            Some(other) => return Err(invalid_default(identifier, ValueKind::Text, other)),
        },
        "choice" | "enum" => {
            let choices = decl.choices.clone().unwrap_or_default();
            let selected = match default {
                None => choices.first().cloned().unwrap_or_default(),
                Some(Value::String(s)) if choices.contains(s) => s.clone(),
                Some(other) => return Err(invalid_default(identifier, ValueKind::Choice, other)),
            };
            TweakValue::Choice(ChoiceValue::new(selected, choices))
        }
        "action" => TweakValue::Action(TweakAction::unbound(identifier)),
        other => {
            tracing::warn!("tweak {} declares unknown kind {:?}", identifier, other);
            TweakValue::Unrecognized {
                kind: other.to_string(),
            }
        }
    };
    Ok(value)
}
