//! Prelude module - commonly used types for convenient import.
//!
//! Use `use mosaic_registry::prelude::*;` to import the essential surface.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use mosaic_registry::prelude::*;
//!
//! let sink = MemorySink::new();
//! let first = Module::new().with_category("selectors", [("pick", 1)]);
//! let second = Module::new().with_category("selectors", [("pick", 2)]);
//!
//! // First contributor wins; the collision is reported once.
//! let merged = merge_with(&[first, second], "selectors", Arc::new(sink.clone()));
//! assert_eq!(merged.get("pick"), Some(&1));
//! assert_eq!(sink.messages(), vec!["selectors pick already exists".to_owned()]);
//! ```

// Composition
pub use crate::{Combined, ComposeOptions, compose};

// Merge engine
pub use crate::{AccessGuard, MergedCategory, merge, merge_with};

// Modules
pub use crate::{CategoryMap, Module, ModuleError, ModuleResult};

// Diagnostics
pub use crate::{DiagnosticSink, MemorySink, NullSink, TracingSink, default_sink};

// Category vocabulary
pub use crate::{
    ACTION_CREATORS, ACTION_TYPES, EFFECTS, REDUCERS, SAGAS, SELECTORS, WELL_KNOWN,
    is_guard_exempt,
};
