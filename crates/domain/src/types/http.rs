//! Transport-independent HTTP exchange descriptors
//!
//! These types describe one request/response round trip without tying the
//! instrumentation hooks to a specific HTTP library.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Outgoing request as observed by the instrumentation hooks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Upper-case HTTP method
    pub method: String,
    /// Absolute request URL (without query string)
    pub url: String,
    /// Path as requested by the caller, relative to the base URL
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    pub body: Option<Value>,
    pub content_type: Option<String>,
}

/// Completed response as observed by the instrumentation hooks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseDescriptor {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    /// Decoded body: JSON when the payload parses, otherwise a string.
    pub body: Option<Value>,
}

impl ResponseDescriptor {
    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One request/response round trip tracked by the instrumentation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub id: Uuid,
    pub base_url: String,
    pub request: RequestDescriptor,
    /// Time between dispatch and the terminal outcome, once known.
    pub elapsed: Option<Duration>,
}

impl Exchange {
    /// Start tracking a new exchange.
    pub fn new(base_url: impl Into<String>, request: RequestDescriptor) -> Self {
        Self { id: Uuid::now_v7(), base_url: base_url.into(), request, elapsed: None }
    }

    /// Elapsed time in whole milliseconds, if the exchange has completed.
    pub fn elapsed_ms(&self) -> Option<u128> {
        self.elapsed.map(|d| d.as_millis())
    }
}

/// Failure of a single HTTP exchange.
///
/// The same value is handed to the error hooks and returned to the caller.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExchangeError {
    #[error("Request could not be built: {message}")]
    RequestBuild { message: String },

    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Connection failed: {message}")]
    Connect { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Request failed with status code {status}")]
    Status { status: u16, body: Option<Value> },

    /// The caller dropped the call before it completed.
    #[error("Request was cancelled")]
    Cancelled,
}

impl ExchangeError {
    /// HTTP status reported by the server, if the exchange got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Error payload returned by the server, if any.
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            Self::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Whether the failure happened before any network activity.
    pub fn is_request_build(&self) -> bool {
        matches!(self, Self::RequestBuild { .. })
    }

}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_error_exposes_status_and_body() {
        let err = ExchangeError::Status { status: 422, body: Some(json!({"detail": "bad"})) };
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.response_body(), Some(&json!({"detail": "bad"})));
        assert_eq!(err.to_string(), "Request failed with status code 422");
    }

    #[test]
    fn transport_errors_have_no_status() {
        let err = ExchangeError::Timeout { timeout_ms: 10_000 };
        assert_eq!(err.status(), None);
        assert!(err.response_body().is_none());
        assert_eq!(err.to_string(), "Request timed out after 10000ms");
    }

    #[test]
    fn cancelled_calls_have_no_status() {
        let err = ExchangeError::Cancelled;
        assert_eq!(err.status(), None);
        assert!(!err.is_request_build());
        assert_eq!(serde_json::to_value(&err).unwrap(), json!({"kind": "cancelled"}));
    }

    #[test]
    fn exchange_ids_are_unique() {
        let a = Exchange::new("http://localhost:8020", RequestDescriptor::default());
        let b = Exchange::new("http://localhost:8020", RequestDescriptor::default());
        assert_ne!(a.id, b.id);
        assert!(a.elapsed_ms().is_none());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let err = ExchangeError::Connect { message: "refused".into() };
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value, json!({"kind": "connect", "message": "refused"}));
    }
}
