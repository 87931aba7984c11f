//! Structured logger
//!
//! A [`Logger`] turns `(level, message, data)` calls into [`LogRecord`]s,
//! renders them for the [`RenderTarget`] chosen at construction and hands the
//! result to a [`LogSink`].
//!
//! Outside development mode only `error` records are produced; every other
//! level is dropped before any work is done.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use serde_json::json;
//! use shopfront_common::observability::logger::{log_data, Logger, MemorySink, RenderTarget};
//!
//! let sink = Arc::new(MemorySink::new());
//! let logger = Logger::new("checkout", true, RenderTarget::AnsiTerminal).with_sink(sink.clone());
//!
//! logger.success("Order placed", log_data(json!({ "orderId": 42 })));
//! assert_eq!(sink.len(), 1);
//! ```

pub mod level;
pub mod record;
pub mod render;
pub mod sink;

use std::sync::Arc;

pub use level::LogLevel;
pub use record::{format_timestamp, log_data, LogData, LogRecord};
pub use render::{render, ConsoleCall, ConsoleGroup, RenderTarget, RenderedRecord};
pub use sink::{CapturedRecord, LogSink, MemorySink, StderrSink};

/// Level-gated, dual-target structured logger.
///
/// Cloning is cheap; clones share the sink.
#[derive(Debug, Clone)]
pub struct Logger {
    scope: String,
    dev_mode: bool,
    target: RenderTarget,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    /// Create a logger writing to standard error.
    pub fn new(scope: impl Into<String>, dev_mode: bool, target: RenderTarget) -> Self {
        Self { scope: scope.into(), dev_mode, target, sink: Arc::new(StderrSink) }
    }

    /// Replace the output sink.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Derive a logger for another scope sharing sink and settings.
    pub fn scoped(&self, scope: impl Into<String>) -> Self {
        Self { scope: scope.into(), ..self.clone() }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn dev_mode(&self) -> bool {
        self.dev_mode
    }

    pub fn target(&self) -> RenderTarget {
        self.target
    }

    /// Whether a record at `level` would be produced.
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.dev_mode || level == LogLevel::Error
    }

    /// Produce, render and emit one record.
    pub fn log(&self, level: LogLevel, message: impl Into<String>, data: Option<LogData>) {
        if !self.is_enabled(level) {
            return;
        }
        let record = LogRecord::now(level, self.scope.as_str(), message, data);
        let rendered = render(self.target, &record);
        self.sink.emit(&record, &rendered);
    }

    pub fn debug(&self, message: impl Into<String>, data: Option<LogData>) {
        self.log(LogLevel::Debug, message, data);
    }

    pub fn info(&self, message: impl Into<String>, data: Option<LogData>) {
        self.log(LogLevel::Info, message, data);
    }

    pub fn warn(&self, message: impl Into<String>, data: Option<LogData>) {
        self.log(LogLevel::Warn, message, data);
    }

    pub fn error(&self, message: impl Into<String>, data: Option<LogData>) {
        self.log(LogLevel::Error, message, data);
    }

    pub fn success(&self, message: impl Into<String>, data: Option<LogData>) {
        self.log(LogLevel::Success, message, data);
    }
}
