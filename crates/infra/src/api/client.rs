//! Typed API client
//!
//! Thin layer over [`HttpClient`] that addresses logical [`Endpoint`]s and
//! (de)serialises JSON payloads. Logging happens in the hooks registered on
//! the transport; this layer only adds typing.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shopfront_core::LoggingHooks;
use shopfront_domain::{Endpoint, HealthStatus, LogsPage, ShopfrontError};
use tracing::{debug, instrument};

use super::errors::ApiError;
use crate::config::AppConfig;
use crate::http::{ApiRequest, HttpClient};

/// API client for the shop backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Build the client described by `config`: resolved base URL, fixed
    /// timeout and request/response logging through the configured logger.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be created
    pub fn from_config(config: &AppConfig) -> Result<Self, ShopfrontError> {
        let hooks = LoggingHooks::new(config.logger().scoped(format!("{}:api", config.app_name)));
        let http = HttpClient::builder()
            .endpoints(config.endpoint_config())
            .timeout(config.request_timeout())
            .default_header("accept", "application/json")
            .hook(Arc::new(hooks))
            .build()?;

        debug!(base_url = http.base_url(), "API client ready");
        Ok(Self::new(http))
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Path of `resource` under `endpoint`, e.g. `(Orders, "42/")`.
    pub fn path(&self, endpoint: Endpoint, resource: &str) -> String {
        format!("{}{}", self.http.endpoints().path(endpoint), resource.trim_start_matches('/'))
    }

    /// Execute a GET request against `endpoint`.
    #[instrument(skip(self))]
    pub async fn get<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        resource: &str,
    ) -> Result<R, ApiError> {
        let request = ApiRequest::get(self.path(endpoint, resource));
        self.call(request).await
    }

    /// Execute a POST request with a JSON body.
    #[instrument(skip(self, body))]
    pub async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        resource: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let request = self.with_body(Method::POST, endpoint, resource, body)?;
        self.call(request).await
    }

    /// Execute a PUT request with a JSON body.
    #[instrument(skip(self, body))]
    pub async fn put<B: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        resource: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let request = self.with_body(Method::PUT, endpoint, resource, body)?;
        self.call(request).await
    }

    /// Execute a PATCH request with a JSON body.
    #[instrument(skip(self, body))]
    pub async fn patch<B: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        resource: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let request = self.with_body(Method::PATCH, endpoint, resource, body)?;
        self.call(request).await
    }

    /// Execute a DELETE request. Use `R = ()` for empty responses.
    #[instrument(skip(self))]
    pub async fn delete<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        resource: &str,
    ) -> Result<R, ApiError> {
        let request = ApiRequest::delete(self.path(endpoint, resource));
        self.call(request).await
    }

    /// Backend and dependency health.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get(Endpoint::Health, "").await
    }

    /// Tail of the backend log file (development backends only).
    pub async fn recent_logs(&self) -> Result<LogsPage, ApiError> {
        self.get(Endpoint::Logs, "").await
    }

    /// Send a prepared request and decode its body.
    ///
    /// An empty body decodes as JSON `null`.
    pub async fn call<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let path = request.path.clone();
        let response = self.http.send(request).await?;

        serde_json::from_value(response.body.unwrap_or(Value::Null))
            .map_err(|e| ApiError::Decode { path, message: e.to_string() })
    }

    fn with_body<B: Serialize>(
        &self,
        method: Method,
        endpoint: Endpoint,
        resource: &str,
        body: &B,
    ) -> Result<ApiRequest, ApiError> {
        let path = self.path(endpoint, resource);
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Encode { path: path.clone(), message: e.to_string() })?;
        Ok(ApiRequest::new(method, path).json(body))
    }
}
