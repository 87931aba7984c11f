//! Privacy Module - Portable Core
//!
//! Domain-independent helpers that keep sensitive values out of log output.

pub mod redaction;

// Re-export commonly used types
pub use redaction::{
    redact, RedactionPolicy, Redactor, DEFAULT_SENSITIVE_PATTERNS, MAX_REDACTION_DEPTH,
    REDACTION_MASK, SENSITIVE_HEADER_PATTERNS,
};
