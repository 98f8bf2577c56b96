//! Non-fatal diagnostics raised while decoding models
//!
//! Hydration and assignment take an optional sink instead of consulting a
//! process-wide logger.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::logger::{Logger, Severity};

/// Event name for a lenient enum that received a value outside its set.
pub const ENUM_VALUE_UNKNOWN: &str = "ENUM_VALUE_UNKNOWN";

/// One diagnostic event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub event: &'static str,
    pub model: String,
    pub field: String,
    /// Value that was discarded
    pub value: String,
    /// Value stored in its place
    pub fallback: String,
}

impl Diagnostic {
    pub fn unknown_enum_value(
        model: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            event: ENUM_VALUE_UNKNOWN,
            model: model.into(),
            field: field.into(),
            value: value.into(),
            fallback: fallback.into(),
        }
    }
}

/// Receiver of diagnostics.
///
/// Sinks are shared by reference across a whole hydration call tree, so
/// they take `&self`.
pub trait DiagnosticSink {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Collects diagnostics in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<Diagnostic>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded diagnostics.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: &Diagnostic) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(diagnostic.clone());
        }
    }
}

/// Forwards diagnostics to the structured logger at WARN.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink {
    logger: Logger,
}

impl LogSink {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl DiagnosticSink for LogSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.logger.log(
            Severity::Warn,
            diagnostic.event,
            &[
                ("model", &diagnostic.model),
                ("field", &diagnostic.field),
                ("value", &diagnostic.value),
                ("fallback", &diagnostic.fallback),
            ],
        );
    }
}
