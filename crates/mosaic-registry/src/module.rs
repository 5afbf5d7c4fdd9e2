//! Caller-supplied modules and their category collections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A category collection: entry keys mapped to contributed values.
///
/// Also the type of a consolidated mapping after merging. Iteration order
/// is the sorted key order; no other ordering is guaranteed.
pub type CategoryMap<V> = BTreeMap<String, V>;

/// Structural errors in a dynamic module definition.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// The definition was not an object at the top level.
    #[error("module definition must be an object, got {found}")]
    NotAnObject {
        /// The JSON type actually found.
        found: &'static str,
    },

    /// A category did not hold a key-to-value mapping.
    #[error("category `{category}` must be an object mapping keys to values, got {found}")]
    InvalidCategory {
        /// The offending category name.
        category: String,
        /// The JSON type actually found.
        found: &'static str,
    },
}

/// Result type for module validation.
pub type ModuleResult<T> = Result<T, ModuleError>;

/// One independently authored module.
///
/// A module contributes zero or more named categories, each holding a
/// [`CategoryMap`] of entries. Modules are read-only inputs to
/// [`merge`](crate::merge) and [`compose`](crate::compose); merging never
/// mutates them.
///
/// On the wire a module is a plain object of objects, so statically typed
/// modules round-trip through serde unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Module<V> {
    categories: BTreeMap<String, CategoryMap<V>>,
}

impl<V> Module<V> {
    /// Create a module contributing nothing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            categories: BTreeMap::new(),
        }
    }

    /// Add a category collection, replacing any previous collection of the
    /// same name.
    #[must_use]
    pub fn with_category<K, I>(mut self, category: impl Into<String>, entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.categories.insert(
            category.into(),
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        );
        self
    }

    /// Insert a single entry, creating the category if it is absent.
    ///
    /// Returns the previous value under that key, if any.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        key: impl Into<String>,
        value: V,
    ) -> Option<V> {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(key.into(), value)
    }

    /// The collection contributed under `category`, if any.
    #[must_use]
    pub fn category(&self, category: &str) -> Option<&CategoryMap<V>> {
        self.categories.get(category)
    }

    /// Whether this module contributes anything under `category`.
    #[must_use]
    pub fn contributes(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// Names of every category this module contributes, in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Whether the module contributes nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl<V> Default for Module<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl Module<serde_json::Value> {
    /// Validate a dynamic JSON value as a module definition.
    ///
    /// The definition must be an object whose values are themselves objects
    /// (category collections). Entry values may be any JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::NotAnObject`] if the top level is not an
    /// object, or [`ModuleError::InvalidCategory`] naming the first
    /// category that does not hold a mapping.
    pub fn from_value(value: serde_json::Value) -> ModuleResult<Self> {
        let categories = match value {
            serde_json::Value::Object(categories) => categories,
            other => {
                return Err(ModuleError::NotAnObject {
                    found: json_type(&other),
                });
            },
        };

        let mut module = Self::new();
        for (category, entries) in categories {
            match entries {
                serde_json::Value::Object(entries) => {
                    module
                        .categories
                        .insert(category, entries.into_iter().collect());
                },
                other => {
                    return Err(ModuleError::InvalidCategory {
                        category,
                        found: json_type(&other),
                    });
                },
            }
        }
        Ok(module)
    }
}

/// Human-readable name of a JSON value's type, for error messages.
fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
