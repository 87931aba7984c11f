//! API-specific error types

use shopfront_domain::{ExchangeError, ShopfrontError};
use thiserror::Error;

/// Broad classes of API failures, used to pick a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401 and 403
    Authentication,
    /// 404
    NotFound,
    /// Other 4xx
    Client,
    /// 5xx
    Server,
    /// Timeouts, refused connections, broken transports
    Network,
    /// Request could not be built or payload could not be (de)serialised
    Payload,
}

/// Typed API operation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error("Failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Failed to serialize request body for {path}: {message}")]
    Encode { path: String, message: String },
}

impl ApiError {
    /// HTTP status reported by the server, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Exchange(err) => err.status(),
            Self::Decode { .. } | Self::Encode { .. } => None,
        }
    }

    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Exchange(ExchangeError::Status { status, .. }) => match status {
                401 | 403 => ApiErrorCategory::Authentication,
                404 => ApiErrorCategory::NotFound,
                500..=599 => ApiErrorCategory::Server,
                _ => ApiErrorCategory::Client,
            },
            Self::Exchange(ExchangeError::RequestBuild { .. }) => ApiErrorCategory::Payload,
            Self::Exchange(_) => ApiErrorCategory::Network,
            Self::Decode { .. } | Self::Encode { .. } => ApiErrorCategory::Payload,
        }
    }
}

impl From<ApiError> for ShopfrontError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Exchange(inner) => ShopfrontError::Exchange(inner),
            ApiError::Decode { .. } => ShopfrontError::Internal(err.to_string()),
            ApiError::Encode { .. } => ShopfrontError::InvalidInput(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn status(status: u16) -> ApiError {
        ApiError::Exchange(ExchangeError::Status { status, body: None })
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(status(401).category(), ApiErrorCategory::Authentication);
        assert_eq!(status(403).category(), ApiErrorCategory::Authentication);
        assert_eq!(status(404).category(), ApiErrorCategory::NotFound);
        assert_eq!(status(422).category(), ApiErrorCategory::Client);
        assert_eq!(status(503).category(), ApiErrorCategory::Server);
        assert_eq!(
            ApiError::Exchange(ExchangeError::Timeout { timeout_ms: 10 }).category(),
            ApiErrorCategory::Network
        );
        assert_eq!(
            ApiError::Decode { path: "/api/health/".into(), message: "eof".into() }.category(),
            ApiErrorCategory::Payload
        );
    }

    #[test]
    fn exchange_errors_keep_their_message_and_status() {
        let err = ApiError::Exchange(ExchangeError::Status {
            status: 500,
            body: Some(json!({"detail": "boom"})),
        });
        assert_eq!(err.to_string(), "Request failed with status code 500");
        assert_eq!(err.status(), Some(500));

        let domain: ShopfrontError = err.into();
        assert!(matches!(domain, ShopfrontError::Exchange(ExchangeError::Status { status: 500, .. })));
    }
}
