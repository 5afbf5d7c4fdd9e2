//! Mosaic Registry - category merge engine for modular state stores.
//!
//! Independently authored modules each contribute named categories of
//! key→value entries (reducers, action types, selectors, and so on). This
//! crate merges them, per category, into one consolidated mapping:
//!
//! - **Ordered precedence**: earlier modules win on key collisions, and
//!   every collision is reported exactly once.
//! - **Guarded reads**: categories outside a small exempt set come back
//!   wrapped in an [`AccessGuard`] that reports reads of keys no module
//!   ever contributed — once per key, never by failing the read.
//! - **Nothing is fatal**: misuse and collisions degrade to messages on an
//!   injected [`DiagnosticSink`] (by default the process warning channel)
//!   plus a best-effort result.
//!
//! # Example
//!
//! ```rust
//! use mosaic_registry::{ComposeOptions, Module, compose};
//!
//! let counters = Module::new()
//!     .with_category("reducers", [("counter", "counter_reducer")])
//!     .with_category("selectors", [("count", "select_count")]);
//! let session = Module::new()
//!     .with_category("reducers", [("session", "session_reducer")]);
//!
//! let combined = compose(&[counters, session], ComposeOptions::new());
//!
//! assert_eq!(combined.reducers.len(), 2);
//! assert_eq!(combined.selectors.get("count"), Some(&"select_count"));
//! // Never contributed: reported once through the sink, then `None`.
//! assert!(combined.selectors.get("missing").is_none());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod category;
mod compose;
mod guard;
mod merge;
mod module;
mod sink;

pub use category::{
    ACTION_CREATORS, ACTION_TYPES, EFFECTS, REDUCERS, SAGAS, SELECTORS, WELL_KNOWN,
    is_guard_exempt,
};
pub use compose::{Combined, ComposeOptions, compose};
pub use guard::AccessGuard;
pub use merge::{MergedCategory, merge, merge_with};
pub use module::{CategoryMap, Module, ModuleError, ModuleResult};
pub use sink::{DiagnosticSink, MemorySink, NullSink, TracingSink, default_sink};
