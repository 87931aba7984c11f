//! Modular common utilities shared across Shopfront crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: pure utilities (sensitive-data redaction)
//! - `observability`: the structured logger, its renderers and sinks

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod privacy;

// Observability tier
// --------------------------------------------------------------
#[cfg(feature = "observability")]
pub mod observability;

// Re-export commonly used types for convenience
// ------------------------
#[cfg(feature = "observability")]
pub use observability::logger::{LogData, LogLevel, LogRecord, LogSink, Logger, RenderTarget};
#[cfg(feature = "foundation")]
pub use privacy::redaction::{redact, RedactionPolicy, Redactor};
