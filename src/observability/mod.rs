//! Observability subsystem
//!
//! - Structured logging (JSON lines)
//! - Diagnostic sinks for non-fatal decode events
//! - Lifecycle events for the command line
//!
//! # Usage
//!
//! ```ignore
//! use sdkmodel::observability::{LogSink, Logger, LogStream, MemorySink};
//!
//! let sink = LogSink::new(Logger::new(LogStream::Stderr));
//! let record = Hydrator::new(&registry).with_sink(&sink).hydrate("Key", &payload)?;
//! ```

mod diagnostics;
mod events;
mod logger;

pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, MemorySink, ENUM_VALUE_UNKNOWN};
pub use events::Event;
pub use logger::{format_line, LogStream, Logger, Severity};

/// Log a lifecycle event with fields
pub fn log_event(logger: &Logger, event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    };
    logger.log(severity, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // This just verifies no panic
        let logger = Logger::new(LogStream::Stderr);
        log_event(&logger, Event::ConfigLoaded, &[]);
        log_event(&logger, Event::DecodeFailed, &[("model", "Key")]);
    }
}
