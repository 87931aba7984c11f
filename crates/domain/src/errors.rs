//! Error types used throughout the client core

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::http::ExchangeError;

/// Main error type for Shopfront
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ShopfrontError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

/// Result type alias for Shopfront operations
pub type Result<T> = std::result::Result<T, ShopfrontError>;
