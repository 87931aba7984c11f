//! Configuration loading and management
//!
//! This module provides utilities for loading application configuration
//! from environment variables and files.

pub mod app_config;
pub mod loader;

// Re-export commonly used items
pub use app_config::AppConfig;
pub use loader::{load, load_from_file, load_from_lookup, find_config_file};
