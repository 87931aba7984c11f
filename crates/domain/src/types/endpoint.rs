//! Logical API endpoints and the resolved endpoint configuration

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::impl_domain_enum_conversions;

/// Logical backend endpoints used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Auth,
    Products,
    Orders,
    Cart,
    Health,
    Logs,
}

impl_domain_enum_conversions!(Endpoint {
    Auth => "auth",
    Products => "products",
    Orders => "orders",
    Cart => "cart",
    Health => "health",
    Logs => "logs",
});

impl Endpoint {
    /// Every logical endpoint, in declaration order.
    pub const ALL: [Endpoint; 6] =
        [Self::Auth, Self::Products, Self::Orders, Self::Cart, Self::Health, Self::Logs];

    /// Default backend path for this endpoint.
    pub fn default_path(self) -> &'static str {
        match self {
            Self::Auth => "/api/auth/",
            Self::Products => "/api/products/",
            Self::Orders => "/api/orders/",
            Self::Cart => "/api/cart/",
            Self::Health => "/api/health/",
            Self::Logs => "/api/logs/",
        }
    }
}

/// Resolved base URL plus the logical endpoint paths.
///
/// Built once at startup and shared read-only for the rest of the process.
/// The base URL never ends with `/` and every path starts with `/`, so
/// [`EndpointConfig::url_for`] always yields exactly one slash at the seam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    base_url: String,
    endpoints: BTreeMap<Endpoint, String>,
}

impl EndpointConfig {
    /// Create a configuration with the default endpoint paths.
    pub fn new(base_url: impl Into<String>) -> Self {
        let endpoints =
            Endpoint::ALL.iter().map(|e| (*e, e.default_path().to_string())).collect();
        Self { base_url: normalize_base_url(&base_url.into()), endpoints }
    }

    /// Replace the path of one logical endpoint.
    pub fn with_path(mut self, endpoint: Endpoint, path: impl Into<String>) -> Self {
        self.endpoints.insert(endpoint, normalize_path(&path.into()));
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path registered for `endpoint`.
    pub fn path(&self, endpoint: Endpoint) -> &str {
        self.endpoints.get(&endpoint).map_or_else(|| endpoint.default_path(), String::as_str)
    }

    /// Absolute URL of a logical endpoint.
    pub fn url(&self, endpoint: Endpoint) -> String {
        self.url_for(self.path(endpoint))
    }

    /// Absolute URL for an arbitrary path relative to the base URL.
    ///
    /// Absolute `http(s)://` inputs are returned untouched.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}{}", self.base_url, normalize_path(path))
    }

    /// Iterate over the registered endpoint paths.
    pub fn endpoints(&self) -> impl Iterator<Item = (Endpoint, &str)> {
        self.endpoints.iter().map(|(e, p)| (*e, p.as_str()))
    }
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
