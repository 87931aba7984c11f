//! Domain types and models

pub mod api;
pub mod endpoint;
pub mod http;
pub mod platform;

pub use api::{HealthStatus, LogsPage};
pub use endpoint::{Endpoint, EndpointConfig};
pub use http::{Exchange, ExchangeError, RequestDescriptor, ResponseDescriptor};
pub use platform::Platform;
