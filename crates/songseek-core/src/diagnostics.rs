//! Diagnostic sinks.
//!
//! The normalization pipeline and the search service never log directly.
//! They report through a [`DiagnosticSink`] handed to them by the caller, so
//! an embedding application decides where diagnostics end up and tests can
//! inspect them without capturing process-wide output.

use std::fmt;
use std::sync::Mutex;

use log::Level;

/// Log target used by [`LogSink`].
pub const LOG_TARGET: &str = "songseek";

/// Receives diagnostic messages.
pub trait DiagnosticSink: Send + Sync + fmt::Debug {
    fn report(&self, level: Level, message: &str);

    fn warn(&self, message: &str) {
        self.report(Level::Warn, message);
    }

    fn debug(&self, message: &str) {
        self.report(Level::Debug, message);
    }
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, level: Level, message: &str) {
        log::log!(target: LOG_TARGET, level, "{}", message);
    }
}

/// Discards all diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _level: Level, _message: &str) {}
}

/// Keeps diagnostics in memory for later inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, oldest first.
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Messages reported at exactly `level`.
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, level: Level, message: &str) {
        // A poisoned lock only means another reporter panicked mid-push.
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push((level, message.to_string()));
    }
}
