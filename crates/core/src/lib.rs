//! # Shopfront Core
//!
//! Pure client logic - no transport or platform code.
//!
//! This crate contains:
//! - Environment-aware base URL resolution
//! - The [`ExchangeHooks`] port fired by HTTP transports
//! - [`LoggingHooks`], the redacting request/response logger
//!
//! ## Architecture Principles
//! - Only depends on `shopfront-common` and `shopfront-domain`
//! - No HTTP library types cross this crate's API
//! - All transports plug in through [`ExchangeHooks`]

pub mod endpoint;
pub mod http;

pub use endpoint::resolver::{default_base_url, resolve_base_url, resolve_base_url_with_port};
pub use http::logging::LoggingHooks;
pub use http::ports::{ExchangeHooks, HookSet};
pub use http::summary::{classify_status, summarize_body};
#[cfg(any(test, feature = "test-utils"))]
pub use http::testing::{HookEvent, HookPhase, RecordingHooks};
