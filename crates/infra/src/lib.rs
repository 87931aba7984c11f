//! # Shopfront Infrastructure
//!
//! Impure adapters around the client core.
//!
//! This crate contains:
//! - The reqwest-backed [`HttpClient`] that fires the instrumentation hooks
//! - The typed [`ApiClient`] for the shop backend
//! - Configuration loading from files and environment variables
//!
//! ## Architecture
//! - Implements the ports defined in `shopfront-core`
//! - Contains all code that performs I/O

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{ApiClient, ApiError, ApiErrorCategory};
pub use config::AppConfig;
pub use errors::InfraError;
pub use http::{ApiRequest, HttpClient, HttpClientBuilder};
