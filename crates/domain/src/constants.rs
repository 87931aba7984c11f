//! Application constants
//!
//! Centralized location for the domain-level defaults used by the resolver,
//! the config loader and the HTTP instrumentation.

// Endpoint resolution
pub const DEFAULT_API_PORT: u16 = 8020;
pub const LOOPBACK_HOST: &str = "localhost";
/// Address the Android emulator routes to the host machine's loopback.
pub const ANDROID_EMULATOR_HOST: &str = "10.0.2.2";

// HTTP client
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

// Logging
pub const DEFAULT_APP_NAME: &str = "shopfront";

// Response body summarisation
pub const MAX_LOGGED_ARRAY_ITEMS: usize = 10;
pub const SAMPLE_ARRAY_ITEMS: usize = 3;
pub const TRUNCATION_NOTICE: &str = "[Truncated - too many items]";
