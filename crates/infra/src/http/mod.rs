//! Instrumented HTTP transport

pub mod client;
pub mod request;

pub use client::{HttpClient, HttpClientBuilder};
pub use request::ApiRequest;
