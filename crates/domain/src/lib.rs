//! # Shopfront Domain
//!
//! Domain types shared by every Shopfront client crate.
//!
//! This crate contains:
//! - Domain error types and Result definitions
//! - Platform and endpoint configuration types
//! - Transport-independent HTTP exchange descriptors
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Shopfront crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
