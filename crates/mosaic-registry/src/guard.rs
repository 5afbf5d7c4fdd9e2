//! Runtime-checked reads of consolidated mappings.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::module::CategoryMap;
use crate::sink::DiagnosticSink;

/// A read guard around a consolidated mapping.
///
/// [`get`](Self::get) behaves like an ordinary map lookup for keys some
/// module contributed. For a key no module ever contributed, the guard
/// reports a diagnostic the first time that key is requested and returns
/// `None`; repeated reads of the same key stay silent. Structural
/// accessors ([`len`](Self::len), [`keys`](Self::keys),
/// [`entries`](Self::entries), iteration) pass through to the underlying
/// mapping and never trigger the absent-key diagnostic.
///
/// Each guard keeps its own warned-key set; two guards over the same
/// category warn independently.
pub struct AccessGuard<V> {
    category: String,
    entries: CategoryMap<V>,
    sink: Arc<dyn DiagnosticSink>,
    warned: Mutex<HashSet<String>>,
}

impl<V> AccessGuard<V> {
    pub(crate) fn new(
        category: impl Into<String>,
        entries: CategoryMap<V>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            category: category.into(),
            entries,
            sink,
            warned: Mutex::new(HashSet::new()),
        }
    }

    /// Look up `key`, reporting a one-shot diagnostic if no module ever
    /// contributed it.
    pub fn get(&self, key: &str) -> Option<&V> {
        if let Some(value) = self.entries.get(key) {
            return Some(value);
        }
        self.warn_absent(key);
        None
    }

    fn warn_absent(&self, key: &str) {
        // A poisoned lock silences the warning; reads must never fail.
        let Ok(mut warned) = self.warned.lock() else {
            return;
        };
        if warned.insert(key.to_owned()) {
            self.sink.emit(&format!(
                "attempting to access non-existent property `{key}` from `{}`",
                self.category
            ));
        }
    }

    /// The category this guard was built for.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Whether `key` was contributed by some module. Never emits a
    /// diagnostic.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of consolidated entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no module contributed any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every consolidated key, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate the consolidated entries, in sorted key order. Never emits
    /// a diagnostic.
    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, String, V> {
        self.entries.iter()
    }

    /// The underlying consolidated mapping, with no read interception.
    #[must_use]
    pub fn entries(&self) -> &CategoryMap<V> {
        &self.entries
    }

    /// Consume the guard, returning the consolidated mapping.
    #[must_use]
    pub fn into_entries(self) -> CategoryMap<V> {
        self.entries
    }
}

impl<'a, V> IntoIterator for &'a AccessGuard<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = std::collections::btree_map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<V> fmt::Debug for AccessGuard<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let warned = self.warned.lock().map(|w| w.len()).unwrap_or(0);
        f.debug_struct("AccessGuard")
            .field("category", &self.category)
            .field("entries", &self.entries.len())
            .field("warned", &warned)
            .finish()
    }
}
