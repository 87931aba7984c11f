//! Infrastructure error conversions

pub mod conversions;

pub use conversions::{exchange_error, InfraError};
