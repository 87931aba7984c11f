//! Endpoint resolution

pub mod resolver;
