//! Redacting request/response logger
//!
//! [`LoggingHooks`] implements [`ExchangeHooks`] on top of the structured
//! [`Logger`]. Headers and bodies are redacted copies; the exchange itself is
//! only read.

use serde_json::{Map, Value};
use shopfront_common::{LogData, LogLevel, Logger, RedactionPolicy, Redactor};
use shopfront_domain::{Exchange, ExchangeError, ResponseDescriptor};

use super::ports::ExchangeHooks;
use super::summary::{classify_status, summarize_body};

/// Logs every phase of an HTTP exchange.
#[derive(Debug, Clone)]
pub struct LoggingHooks {
    logger: Logger,
    body_redactor: Redactor,
    header_redactor: Redactor,
    excluded_paths: Vec<String>,
}

impl LoggingHooks {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            body_redactor: Redactor::default(),
            header_redactor: Redactor::new(RedactionPolicy::http_headers()),
            excluded_paths: Vec::new(),
        }
    }

    /// Skip logging for requests whose path starts with any of `prefixes`.
    pub fn with_excluded_paths<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_paths.extend(prefixes.into_iter().map(Into::into));
        self
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    fn is_excluded(&self, exchange: &Exchange) -> bool {
        let path = exchange.request.path.as_str();
        self.excluded_paths.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }

    fn request_data(&self, exchange: &Exchange) -> LogData {
        let request = &exchange.request;
        let mut data = Map::new();

        if !request.headers.is_empty() {
            data.insert(
                "headers".into(),
                Value::Object(self.header_redactor.redact_pairs(&request.headers)),
            );
        }
        if !request.query.is_empty() {
            data.insert(
                "queryParams".into(),
                Value::Object(self.body_redactor.redact_pairs(&request.query)),
            );
        }
        if let Some(body) = &request.body {
            data.insert("body".into(), self.body_redactor.redact(body));
        }
        if let Some(content_type) = &request.content_type {
            data.insert("contentType".into(), Value::String(content_type.clone()));
        }
        data
    }

    fn response_data(&self, response: &ResponseDescriptor, elapsed_ms: u128) -> LogData {
        let mut data = Map::new();
        data.insert("status".into(), Value::from(response.status));
        data.insert("duration".into(), Value::String(format!("{elapsed_ms}ms")));

        if !response.headers.is_empty() {
            data.insert(
                "headers".into(),
                Value::Object(self.header_redactor.redact_pairs(&response.headers)),
            );
        }
        if let Some(body) = &response.body {
            data.insert("body".into(), self.body_redactor.redact(&summarize_body(body)));
        }
        data
    }

    fn error_data(&self, exchange: &Exchange, error: &ExchangeError) -> LogData {
        let mut data = Map::new();
        data.insert("error".into(), Value::String(error.to_string()));
        if let Some(status) = error.status() {
            data.insert("status".into(), Value::from(status));
        }
        data.insert("url".into(), Value::String(exchange.request.url.clone()));
        data.insert("baseUrl".into(), Value::String(exchange.base_url.clone()));
        if let Some(elapsed_ms) = exchange.elapsed_ms() {
            data.insert("duration".into(), Value::String(format!("{elapsed_ms}ms")));
        }
        if let Some(body) = error.response_body() {
            data.insert("responseData".into(), self.body_redactor.redact(body));
        }
        data
    }
}

impl ExchangeHooks for LoggingHooks {
    fn on_request(&self, exchange: &Exchange) {
        if self.is_excluded(exchange) || !self.logger.is_enabled(LogLevel::Info) {
            return;
        }
        let request = &exchange.request;
        self.logger.info(
            format!("API Request: {} {}", request.method, request.url),
            Some(self.request_data(exchange)),
        );
    }

    fn on_request_error(&self, exchange: &Exchange, error: &ExchangeError) {
        if self.is_excluded(exchange) {
            return;
        }
        let request = &exchange.request;
        let mut data = Map::new();
        data.insert("error".into(), Value::String(error.to_string()));
        data.insert("url".into(), Value::String(request.url.clone()));
        data.insert("baseUrl".into(), Value::String(exchange.base_url.clone()));
        self.logger
            .error(format!("API Request Error: {} {}", request.method, request.url), Some(data));
    }

    fn on_response(&self, exchange: &Exchange, response: &ResponseDescriptor) {
        let level = classify_status(response.status);
        if self.is_excluded(exchange) || !self.logger.is_enabled(level) {
            return;
        }
        let request = &exchange.request;
        let elapsed_ms = exchange.elapsed_ms().unwrap_or_default();
        self.logger.log(
            level,
            format!(
                "API Response: {} {} [{}] {}ms",
                request.method, request.url, response.status, elapsed_ms
            ),
            Some(self.response_data(response, elapsed_ms)),
        );
    }

    fn on_response_error(&self, exchange: &Exchange, error: &ExchangeError) {
        if self.is_excluded(exchange) {
            return;
        }
        let request = &exchange.request;
        self.logger.error(
            format!("API Error: {} {}", request.method, request.url),
            Some(self.error_data(exchange, error)),
        );
    }
}
