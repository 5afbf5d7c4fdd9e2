//! Diagnostic reporting for merge and guard operations.
//!
//! Nothing in this crate fails loudly: collisions, misuse, and reads of
//! never-contributed keys are all surfaced as human-readable messages
//! through a [`DiagnosticSink`]. Callers that pass a [`NullSink`] receive
//! best-effort merged data with no observable errors at all.

use std::sync::{Arc, Mutex};

use tracing::warn;

/// A destination for human-readable diagnostic messages.
///
/// Sinks must never fail; a sink that cannot deliver a message should drop
/// it. There is no structured format — messages are plain strings.
pub trait DiagnosticSink: Send + Sync {
    /// Report one diagnostic message.
    fn emit(&self, message: &str);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, message: &str) {
        self(message);
    }
}

/// The default sink: forwards every message to [`tracing::warn!`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, message: &str) {
        warn!("{message}");
    }
}

/// A sink that discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _message: &str) {}
}

/// A sink that records every message in memory.
///
/// Clones share the same buffer, so a `MemorySink` can be handed to a merge
/// call and inspected afterwards. Used throughout this crate's tests and
/// useful to callers that want to collect diagnostics instead of logging
/// them.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages recorded so far, in emission order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Number of messages recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// Whether no message has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_owned());
        }
    }
}

/// The process-wide default sink, shared by every call that does not
/// override it.
#[must_use]
pub fn default_sink() -> Arc<dyn DiagnosticSink> {
    Arc::new(TracingSink)
}
