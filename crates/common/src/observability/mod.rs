//! Observability Module
//!
//! Structured, level-gated logging with explicit render targets.

pub mod logger;

pub use logger::{
    ConsoleCall, ConsoleGroup, LogData, LogLevel, LogRecord, LogSink, Logger, MemorySink,
    RenderTarget, RenderedRecord, StderrSink,
};
