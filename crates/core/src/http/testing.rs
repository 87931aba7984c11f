//! Recording hooks for asserting hook order in tests

use parking_lot::Mutex;
use shopfront_domain::{Exchange, ExchangeError, ResponseDescriptor};
use uuid::Uuid;

use super::ports::ExchangeHooks;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    Request,
    RequestError,
    Response,
    ResponseError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookEvent {
    pub exchange_id: Uuid,
    pub phase: HookPhase,
    pub method: String,
    pub url: String,
    pub status: Option<u16>,
}

/// Records every hook firing in order.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    events: Mutex<Vec<HookEvent>>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<HookEvent> {
        self.events.lock().clone()
    }

    /// Phases fired for one exchange, in order.
    pub fn phases_for(&self, exchange_id: Uuid) -> Vec<HookPhase> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.exchange_id == exchange_id)
            .map(|event| event.phase)
            .collect()
    }

    fn record(&self, exchange: &Exchange, phase: HookPhase, status: Option<u16>) {
        self.events.lock().push(HookEvent {
            exchange_id: exchange.id,
            phase,
            method: exchange.request.method.clone(),
            url: exchange.request.url.clone(),
            status,
        });
    }
}

impl ExchangeHooks for RecordingHooks {
    fn on_request(&self, exchange: &Exchange) {
        self.record(exchange, HookPhase::Request, None);
    }

    fn on_request_error(&self, exchange: &Exchange, error: &ExchangeError) {
        self.record(exchange, HookPhase::RequestError, error.status());
    }

    fn on_response(&self, exchange: &Exchange, response: &ResponseDescriptor) {
        self.record(exchange, HookPhase::Response, Some(response.status));
    }

    fn on_response_error(&self, exchange: &Exchange, error: &ExchangeError) {
        self.record(exchange, HookPhase::ResponseError, error.status());
    }
}
