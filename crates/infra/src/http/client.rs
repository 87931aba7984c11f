use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Request};
use serde_json::Value;
use shopfront_core::{default_base_url, ExchangeHooks, HookSet};
use shopfront_domain::constants::{DEFAULT_API_PORT, DEFAULT_REQUEST_TIMEOUT_MS};
use shopfront_domain::{
    EndpointConfig, Exchange, ExchangeError, Platform, RequestDescriptor, ResponseDescriptor,
    ShopfrontError,
};
use tracing::debug;

use super::request::ApiRequest;
use crate::errors::{exchange_error, InfraError};

const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP client that fires the instrumentation hooks around every call.
///
/// Each call fires at most one of `on_request` / `on_request_error` followed
/// by exactly one of `on_response` / `on_response_error`, including when the
/// caller drops the call mid-flight. There are no retries; a failure is
/// reported to the hooks and returned once.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    endpoints: Arc<EndpointConfig>,
    hooks: Arc<HookSet>,
    default_headers: Arc<BTreeMap<String, String>>,
    timeout: Duration,
    accept_all_statuses: bool,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, ShopfrontError> {
        Self::builder().build()
    }

    pub fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    pub fn base_url(&self) -> &str {
        self.endpoints.base_url()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute `request` and return the decoded response.
    ///
    /// Responses rejected by the status validator come back as
    /// [`ExchangeError::Status`] carrying the decoded error body.
    pub async fn send(&self, request: ApiRequest) -> Result<ResponseDescriptor, ExchangeError> {
        let mut exchange = Exchange::new(self.endpoints.base_url(), self.describe(&request));

        let outgoing = match self.build_request(&request, &exchange.request) {
            Ok(outgoing) => outgoing,
            Err(error) => {
                debug!(
                    exchange_id = %exchange.id,
                    method = %exchange.request.method,
                    url = %exchange.request.url,
                    error = %error,
                    "failed to build HTTP request"
                );
                self.hooks.on_request_error(&exchange, &error);
                self.hooks.on_response_error(&exchange, &error);
                return Err(error);
            }
        };

        self.hooks.on_request(&exchange);
        debug!(
            exchange_id = %exchange.id,
            method = %exchange.request.method,
            url = %exchange.request.url,
            "sending HTTP request"
        );

        let in_flight = InFlight::arm(&self.hooks, &mut exchange);
        let outcome = self.execute(outgoing).await;
        in_flight.disarm();

        match outcome {
            Ok(response) if self.accepts(&response) => {
                debug!(exchange_id = %exchange.id, status = response.status, "received HTTP response");
                self.hooks.on_response(&exchange, &response);
                Ok(response)
            }
            Ok(response) => {
                debug!(exchange_id = %exchange.id, status = response.status, "HTTP status rejected");
                let error = ExchangeError::Status { status: response.status, body: response.body };
                self.hooks.on_response_error(&exchange, &error);
                Err(error)
            }
            Err(error) => {
                debug!(exchange_id = %exchange.id, error = %error, "HTTP request failed");
                self.hooks.on_response_error(&exchange, &error);
                Err(error)
            }
        }
    }

    fn accepts(&self, response: &ResponseDescriptor) -> bool {
        self.accept_all_statuses || response.is_success()
    }

    fn describe(&self, request: &ApiRequest) -> RequestDescriptor {
        let mut headers = self.default_headers.as_ref().clone();
        headers.extend(request.headers.iter().map(|(k, v)| (k.clone(), v.clone())));

        let content_type = headers
            .get(CONTENT_TYPE.as_str())
            .cloned()
            .or_else(|| request.body.as_ref().map(|_| JSON_CONTENT_TYPE.to_string()));

        RequestDescriptor {
            method: request.method.as_str().to_string(),
            url: self.endpoints.url_for(&request.path),
            path: request.path.clone(),
            headers,
            query: request.query.clone(),
            body: request.body.clone(),
            content_type,
        }
    }

    fn build_request(
        &self,
        request: &ApiRequest,
        descriptor: &RequestDescriptor,
    ) -> Result<Request, ExchangeError> {
        let headers = header_map(&descriptor.headers)
            .map_err(|message| ExchangeError::RequestBuild { message })?;

        let mut builder =
            self.client.request(request.method.clone(), descriptor.url.as_str()).headers(headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        builder.build().map_err(|err| exchange_error(&err, self.timeout))
    }

    async fn execute(&self, request: Request) -> Result<ResponseDescriptor, ExchangeError> {
        let response =
            self.client.execute(request).await.map_err(|err| exchange_error(&err, self.timeout))?;

        let status = response.status().as_u16();
        let headers = header_pairs(response.headers());
        let bytes = response.bytes().await.map_err(|err| exchange_error(&err, self.timeout))?;

        Ok(ResponseDescriptor { status, headers, body: decode_body(&bytes) })
    }
}

/// Tracks a sent request until its outcome is known.
///
/// If the `send` future is dropped while the request is in flight, the guard
/// fires `on_response_error` with [`ExchangeError::Cancelled`] so every
/// `on_request` still gets its terminal hook.
struct InFlight<'a> {
    hooks: &'a HookSet,
    exchange: &'a mut Exchange,
    started: Instant,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn arm(hooks: &'a HookSet, exchange: &'a mut Exchange) -> Self {
        Self { hooks, exchange, started: Instant::now(), armed: true }
    }

    /// Stop tracking and stamp the exchange with its elapsed time.
    fn disarm(mut self) {
        self.armed = false;
        self.exchange.elapsed = Some(self.started.elapsed());
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.exchange.elapsed = Some(self.started.elapsed());
        debug!(exchange_id = %self.exchange.id, "HTTP request cancelled by caller");
        self.hooks.on_response_error(self.exchange, &ExchangeError::Cancelled);
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: BTreeMap<String, String>,
    endpoints: Option<EndpointConfig>,
    hooks: HookSet,
    accept_all_statuses: bool,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            user_agent: None,
            default_headers: BTreeMap::new(),
            endpoints: None,
            hooks: HookSet::new(),
            accept_all_statuses: false,
        }
    }
}

impl HttpClientBuilder {
    /// Fixed timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Header sent with every request; names are stored lower-cased.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.endpoints = Some(EndpointConfig::new(base_url));
        self
    }

    pub fn endpoints(mut self, endpoints: EndpointConfig) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Register a hook; hooks fire in registration order.
    pub fn hook(mut self, hook: Arc<dyn ExchangeHooks>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn hooks(mut self, hooks: HookSet) -> Self {
        self.hooks = hooks;
        self
    }

    /// Hand every response to `on_response` instead of rejecting non-2xx.
    pub fn accept_all_statuses(mut self, enabled: bool) -> Self {
        self.accept_all_statuses = enabled;
        self
    }

    pub fn build(self) -> Result<HttpClient, ShopfrontError> {
        header_map(&self.default_headers).map_err(ShopfrontError::InvalidInput)?;

        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            ShopfrontError::from(infra)
        })?;

        let endpoints = self
            .endpoints
            .unwrap_or_else(|| EndpointConfig::new(default_base_url(Platform::Web, DEFAULT_API_PORT)));

        Ok(HttpClient {
            client,
            endpoints: Arc::new(endpoints),
            hooks: Arc::new(self.hooks),
            default_headers: Arc::new(self.default_headers),
            timeout: self.timeout,
            accept_all_statuses: self.accept_all_statuses,
        })
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, String> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| format!("invalid header name '{name}': {err}"))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|err| format!("invalid value for header '{name}': {err}"))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Flatten response headers; repeated headers are joined with `", "`.
fn header_pairs(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut pairs: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        pairs
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    pairs
}

/// JSON when the payload parses, otherwise lossy UTF-8 text. Empty is `None`.
fn decode_body(bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }
    Some(
        serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned())),
    )
}
