//! HTTP instrumentation
//!
//! Transport-independent hooks fired around every outbound call, and the
//! redacting logger built on them.

pub mod logging;
pub mod ports;
pub mod summary;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
