//! Aggregation of module contributions across every category.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::category;
use crate::guard::AccessGuard;
use crate::merge::{self, MergedCategory};
use crate::module::{CategoryMap, Module};
use crate::sink::{DiagnosticSink, default_sink};

/// Options for [`compose`].
#[derive(Default)]
pub struct ComposeOptions {
    extra: Vec<String>,
    log: Option<Arc<dyn DiagnosticSink>>,
}

impl ComposeOptions {
    /// Default options: no extra categories, diagnostics to the
    /// process-wide warning channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request additional categories beyond the well-known set, merged in
    /// the order given.
    #[must_use]
    pub fn extra<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra.extend(names.into_iter().map(Into::into));
        self
    }

    /// Override the diagnostic sink used for every category merge.
    #[must_use]
    pub fn log(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.log = Some(sink);
        self
    }
}

impl fmt::Debug for ComposeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposeOptions")
            .field("extra", &self.extra)
            .field("has_log", &self.log.is_some())
            .finish()
    }
}

/// Every module contribution merged into one record.
///
/// The six well-known categories are always present, empty when no module
/// contributed to them. `reducers` and `sagas` hold the raw consolidated
/// mapping for the framework that consumes them; the other categories sit
/// behind an [`AccessGuard`]. Extra categories requested through
/// [`ComposeOptions::extra`] are kept in request order.
pub struct Combined<V> {
    /// Reducer functions, keyed by the state slice they own.
    pub reducers: CategoryMap<V>,
    /// Action type constants.
    pub action_types: AccessGuard<V>,
    /// Action creator functions.
    pub action_creators: AccessGuard<V>,
    /// Long-running coordination routines, unwrapped for their runner.
    pub sagas: CategoryMap<V>,
    /// Side-effect producing procedures.
    pub effects: AccessGuard<V>,
    /// Derived-state selector functions.
    pub selectors: AccessGuard<V>,
    extras: Vec<(String, MergedCategory<V>)>,
}

impl<V> Combined<V> {
    /// The merged result for an extra category, if it was requested.
    #[must_use]
    pub fn extra(&self, name: &str) -> Option<&MergedCategory<V>> {
        self.extras
            .iter()
            .find(|(extra, _)| extra == name)
            .map(|(_, merged)| merged)
    }

    /// Extra categories in the order they were requested.
    pub fn extras(&self) -> impl Iterator<Item = (&str, &MergedCategory<V>)> {
        self.extras
            .iter()
            .map(|(name, merged)| (name.as_str(), merged))
    }
}

impl<V> fmt::Debug for Combined<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combined")
            .field("reducers", &self.reducers.len())
            .field("action_types", &self.action_types.len())
            .field("action_creators", &self.action_creators.len())
            .field("sagas", &self.sagas.len())
            .field("effects", &self.effects.len())
            .field("selectors", &self.selectors.len())
            .field(
                "extras",
                &self.extras.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Merge every well-known category, plus any requested extras, across
/// `modules`.
///
/// Each category is merged independently with the same diagnostic sink,
/// exactly as [`merge_with`](crate::merge_with) would: earlier modules win
/// on collisions, and every abnormal condition is reported through the
/// sink rather than failing the call.
#[must_use]
pub fn compose<V: Clone>(modules: &[Module<V>], options: ComposeOptions) -> Combined<V> {
    let ComposeOptions { extra, log } = options;
    let sink = log.unwrap_or_else(default_sink);

    let reducers = merge::consolidate(modules, category::REDUCERS, sink.as_ref());
    let sagas = merge::consolidate(modules, category::SAGAS, sink.as_ref());
    let action_types = guarded(modules, category::ACTION_TYPES, &sink);
    let action_creators = guarded(modules, category::ACTION_CREATORS, &sink);
    let effects = guarded(modules, category::EFFECTS, &sink);
    let selectors = guarded(modules, category::SELECTORS, &sink);

    let extras: Vec<(String, MergedCategory<V>)> = extra
        .into_iter()
        .map(|name| {
            let merged = merge::merge_with(modules, &name, Arc::clone(&sink));
            (name, merged)
        })
        .collect();

    debug!(
        modules = modules.len(),
        extras = extras.len(),
        "composed module contributions"
    );

    Combined {
        reducers,
        action_types,
        action_creators,
        sagas,
        effects,
        selectors,
        extras,
    }
}

/// Consolidate one category and wrap it for guarded reads.
fn guarded<V: Clone>(
    modules: &[Module<V>],
    category: &str,
    sink: &Arc<dyn DiagnosticSink>,
) -> AccessGuard<V> {
    let entries = merge::consolidate(modules, category, sink.as_ref());
    AccessGuard::new(category, entries, Arc::clone(sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn test_empty_modules_yield_every_well_known_category() {
        let sink = MemorySink::new();
        let combined: Combined<i32> =
            compose(&[], ComposeOptions::new().log(Arc::new(sink.clone())));

        assert!(combined.reducers.is_empty());
        assert!(combined.action_types.is_empty());
        assert!(combined.action_creators.is_empty());
        assert!(combined.sagas.is_empty());
        assert!(combined.effects.is_empty());
        assert!(combined.selectors.is_empty());
        assert_eq!(combined.extras().count(), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_contributions_combine_across_modules() {
        let first = Module::new()
            .with_category("action_types", [("ONE", 1)])
            .with_category("action_creators", [("one", 10), ("two", 20)])
            .with_category("effects", [("send_one", 100)]);
        let second = Module::new()
            .with_category("sagas", [("on_send_one", 200)])
            .with_category("action_types", [("TWO", 2), ("THREE", 3)]);

        let sink = MemorySink::new();
        let combined = compose(
            &[first, second],
            ComposeOptions::new().log(Arc::new(sink.clone())),
        );

        assert_eq!(combined.action_types.len(), 3);
        assert_eq!(combined.action_types.get("THREE"), Some(&3));
        assert_eq!(combined.action_creators.len(), 2);
        assert_eq!(combined.effects.get("send_one"), Some(&100));
        assert_eq!(combined.sagas.get("on_send_one"), Some(&200));
        assert!(combined.reducers.is_empty());
        assert!(combined.selectors.is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_extras_merge_in_request_order() {
        let first = Module::new().with_category("something", [("four", 4)]);
        let second = Module::new().with_category("something", [("five", 5)]);

        let combined = compose(
            &[first, second],
            ComposeOptions::new()
                .extra(["something", "other"])
                .log(Arc::new(MemorySink::new())),
        );

        let something = combined.extra("something").unwrap();
        assert_eq!(something.get("four"), Some(&4));
        assert_eq!(something.get("five"), Some(&5));

        let names: Vec<_> = combined.extras().map(|(name, _)| name).collect();
        assert_eq!(names, ["something", "other"]);
        assert!(combined.extra("other").unwrap().is_empty());
        assert!(combined.extra("unrequested").is_none());

        // Requesting extras never displaces the well-known categories.
        assert!(combined.reducers.is_empty());
        assert!(combined.selectors.is_empty());
    }

    #[test]
    fn test_shared_sink_sees_every_category() {
        let first = Module::new()
            .with_category("selectors", [("x", 1)])
            .with_category("reducers", [("counter", 1)]);
        let second = Module::new()
            .with_category("selectors", [("x", 2)])
            .with_category("reducers", [("counter", 2)]);

        let sink = MemorySink::new();
        let combined = compose(
            &[first, second],
            ComposeOptions::new().log(Arc::new(sink.clone())),
        );

        assert_eq!(
            sink.messages(),
            vec![
                "reducers counter already exists".to_owned(),
                "selectors x already exists".to_owned(),
            ]
        );

        // The guard built by compose reports through the same sink.
        assert_eq!(combined.selectors.get("missing"), None);
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_options_debug_redacts_sink() {
        let options = ComposeOptions::new()
            .extra(["something"])
            .log(Arc::new(MemorySink::new()));
        let debug = format!("{options:?}");
        assert!(debug.contains("something"));
        assert!(debug.contains("has_log: true"));
    }
}
