//! Port interfaces for HTTP instrumentation
//!
//! Transports call these hooks; implementations only observe. For a single
//! call a transport fires at most one of `on_request` / `on_request_error`,
//! followed by exactly one of `on_response` / `on_response_error`.

use std::fmt::Debug;
use std::sync::Arc;

use shopfront_domain::{Exchange, ExchangeError, ResponseDescriptor};

/// Observer of the four phases of an HTTP exchange.
///
/// Every method defaults to a no-op so implementations only override the
/// phases they care about.
pub trait ExchangeHooks: Send + Sync + Debug {
    /// The request was built and is about to be sent.
    fn on_request(&self, _exchange: &Exchange) {}

    /// Building the request failed; nothing was sent.
    fn on_request_error(&self, _exchange: &Exchange, _error: &ExchangeError) {}

    /// A response was received and accepted by the status validator.
    fn on_response(&self, _exchange: &Exchange, _response: &ResponseDescriptor) {}

    /// The exchange failed: construction, transport, or a rejected status.
    fn on_response_error(&self, _exchange: &Exchange, _error: &ExchangeError) {}
}

/// Ordered collection of hooks fired as one.
#[derive(Debug, Clone, Default)]
pub struct HookSet {
    hooks: Vec<Arc<dyn ExchangeHooks>>,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook; hooks fire in registration order.
    pub fn push(&mut self, hook: Arc<dyn ExchangeHooks>) {
        self.hooks.push(hook);
    }

    pub fn with(mut self, hook: Arc<dyn ExchangeHooks>) -> Self {
        self.push(hook);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl ExchangeHooks for HookSet {
    fn on_request(&self, exchange: &Exchange) {
        for hook in &self.hooks {
            hook.on_request(exchange);
        }
    }

    fn on_request_error(&self, exchange: &Exchange, error: &ExchangeError) {
        for hook in &self.hooks {
            hook.on_request_error(exchange, error);
        }
    }

    fn on_response(&self, exchange: &Exchange, response: &ResponseDescriptor) {
        for hook in &self.hooks {
            hook.on_response(exchange, response);
        }
    }

    fn on_response_error(&self, exchange: &Exchange, error: &ExchangeError) {
        for hook in &self.hooks {
            hook.on_response_error(exchange, error);
        }
    }
}
