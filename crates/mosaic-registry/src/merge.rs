//! Ordered, collision-aware merging of module categories.

use std::sync::Arc;

use crate::category;
use crate::guard::AccessGuard;
use crate::module::{CategoryMap, Module};
use crate::sink::{DiagnosticSink, default_sink};

/// The result of merging one category across a module sequence.
#[derive(Debug)]
pub enum MergedCategory<V> {
    /// The raw consolidated mapping, for guard-exempt categories whose
    /// consumers iterate it directly.
    Plain(CategoryMap<V>),
    /// The consolidated mapping behind an [`AccessGuard`].
    Guarded(AccessGuard<V>),
}

impl<V> MergedCategory<V> {
    /// Look up an entry. Guarded results report reads of keys no module
    /// contributed, once per key.
    pub fn get(&self, key: &str) -> Option<&V> {
        match self {
            Self::Plain(entries) => entries.get(key),
            Self::Guarded(guard) => guard.get(key),
        }
    }

    /// Whether `key` was contributed by some module. Never emits a
    /// diagnostic.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }

    /// Number of consolidated entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether no module contributed any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Whether reads through [`get`](Self::get) are guarded.
    #[must_use]
    pub fn is_guarded(&self) -> bool {
        matches!(self, Self::Guarded(_))
    }

    /// The consolidated mapping, with no read interception.
    #[must_use]
    pub fn entries(&self) -> &CategoryMap<V> {
        match self {
            Self::Plain(entries) => entries,
            Self::Guarded(guard) => guard.entries(),
        }
    }

    /// Consume the result, returning the consolidated mapping.
    #[must_use]
    pub fn into_entries(self) -> CategoryMap<V> {
        match self {
            Self::Plain(entries) => entries,
            Self::Guarded(guard) => guard.into_entries(),
        }
    }
}

/// Merge one category across `modules` using the process-wide default
/// sink.
///
/// See [`merge_with`].
#[must_use]
pub fn merge<V: Clone>(modules: &[Module<V>], category: &str) -> MergedCategory<V> {
    merge_with(modules, category, default_sink())
}

/// Merge one category across `modules`, reporting diagnostics to `sink`.
///
/// Modules earlier in the slice take precedence: the consolidated value
/// for every key is the first contribution, and each later contribution
/// of an already-present key is reported once and dropped. An empty
/// `category` is reported and yields an empty unguarded mapping.
///
/// Categories outside the guard-exempt set come back wrapped in an
/// [`AccessGuard`] that diagnoses reads of keys no module contributed.
/// Nothing here fails: every abnormal condition degrades to a sink
/// message plus a best-effort result.
#[must_use]
pub fn merge_with<V: Clone>(
    modules: &[Module<V>],
    category: &str,
    sink: Arc<dyn DiagnosticSink>,
) -> MergedCategory<V> {
    if category.is_empty() {
        sink.emit("a category name must be provided, e.g. `reducers` or `sagas`");
        return MergedCategory::Plain(CategoryMap::new());
    }

    let entries = consolidate(modules, category, sink.as_ref());

    if category::is_guard_exempt(category) {
        MergedCategory::Plain(entries)
    } else {
        MergedCategory::Guarded(AccessGuard::new(category, entries, sink))
    }
}

/// Walk `modules` in order, keeping the first contribution for every key
/// and reporting each collision.
pub(crate) fn consolidate<V: Clone>(
    modules: &[Module<V>],
    category: &str,
    sink: &dyn DiagnosticSink,
) -> CategoryMap<V> {
    let mut merged = CategoryMap::new();

    for module in modules {
        let Some(entries) = module.category(category) else {
            continue;
        };
        for (key, value) in entries {
            if merged.contains_key(key) {
                sink.emit(&format!("{category} {key} already exists"));
                continue;
            }
            merged.insert(key.clone(), value.clone());
        }
    }

    merged
}
