//! Advisory diagnostics emitted by strategies.
//!
//! Diagnostics are one-line advisory messages ("No data after anchor date
//! ...", metric summaries). They never influence the returned allocation;
//! the host decides where they go. Injected at strategy construction so
//! tests can capture them.

use std::sync::Mutex;

/// Sink for advisory strategy messages.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, message: &str);
}

/// Logs each diagnostic at info level via the `log` facade.
pub struct LogDiagnostics;

impl DiagnosticSink for LogDiagnostics {
    fn emit(&self, message: &str) {
        log::info!("{message}");
    }
}

/// Prints each diagnostic to stdout.
pub struct StdoutDiagnostics;

impl DiagnosticSink for StdoutDiagnostics {
    fn emit(&self, message: &str) {
        println!("{message}");
    }
}

/// Discards all diagnostics.
pub struct NullDiagnostics;

impl DiagnosticSink for NullDiagnostics {
    fn emit(&self, _message: &str) {}
}

/// Captures diagnostics for test assertions.
#[derive(Default)]
pub struct RecordingDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("diagnostics lock").clone()
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn emit(&self, message: &str) {
        self.messages
            .lock()
            .expect("diagnostics lock")
            .push(message.to_string());
    }
}
