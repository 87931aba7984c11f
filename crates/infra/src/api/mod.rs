//! Typed client for the shop backend API

pub mod client;
pub mod errors;

pub use client::ApiClient;
pub use errors::{ApiError, ApiErrorCategory};
