//! Conversions from external infrastructure errors into domain errors.

use std::time::Duration;

use reqwest::Error as HttpError;
use shopfront_domain::{ExchangeError, ShopfrontError};

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ShopfrontError);

impl From<InfraError> for ShopfrontError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ShopfrontError> for InfraError {
    fn from(value: ShopfrontError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoShopfrontError {
    fn into_shopfront(self) -> ShopfrontError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ShopfrontError */
/* -------------------------------------------------------------------------- */

/// Only client construction goes through this conversion, and
/// `ClientBuilder::build` fails with builder errors alone.
impl IntoShopfrontError for HttpError {
    fn into_shopfront(self) -> ShopfrontError {
        ShopfrontError::Config(format!("invalid HTTP client configuration: {self}"))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_shopfront())
    }
}

/// Classify a reqwest failure that happened while executing an exchange.
///
/// `timeout` is the client's fixed request timeout, reported back on
/// [`ExchangeError::Timeout`].
pub fn exchange_error(err: &HttpError, timeout: Duration) -> ExchangeError {
    let message = error_chain(err);

    if err.is_builder() {
        return ExchangeError::RequestBuild { message };
    }
    if err.is_timeout() {
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        return ExchangeError::Timeout { timeout_ms };
    }
    if err.is_connect() {
        return ExchangeError::Connect { message };
    }
    ExchangeError::Transport { message }
}

/// `Display` of the error followed by its sources.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/* -------------------------------------------------------------------------- */
/* config file parse errors → ShopfrontError */
/* -------------------------------------------------------------------------- */

impl IntoShopfrontError for toml::de::Error {
    fn into_shopfront(self) -> ShopfrontError {
        ShopfrontError::Config(format!("Invalid TOML format: {self}"))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(value.into_shopfront())
    }
}

impl IntoShopfrontError for serde_json::Error {
    fn into_shopfront(self) -> ShopfrontError {
        ShopfrontError::Config(format!("Invalid JSON format: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_shopfront())
    }
}

impl IntoShopfrontError for std::io::Error {
    fn into_shopfront(self) -> ShopfrontError {
        match self.kind() {
            std::io::ErrorKind::NotFound => {
                ShopfrontError::Config(format!("Config file not found: {self}"))
            }
            _ => ShopfrontError::Config(format!("Failed to read config file: {self}")),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_shopfront())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::Client;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn refused_connection_is_a_connect_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        match exchange_error(&error, Duration::from_secs(1)) {
            ExchangeError::Connect { message } => assert!(!message.is_empty()),
            other => panic!("expected connect error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_server_is_a_timeout_with_configured_budget() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let timeout = Duration::from_millis(50);
        let client = Client::builder().no_proxy().timeout(timeout).build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap_err();

        assert_eq!(exchange_error(&error, timeout), ExchangeError::Timeout { timeout_ms: 50 });
    }

    #[test]
    fn unparseable_url_is_a_request_build_error() {
        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get("http://exa mple.com").build().unwrap_err();

        assert!(exchange_error(&error, Duration::from_secs(1)).is_request_build());
    }

    #[test]
    fn builder_errors_map_to_config() {
        let error = Client::new().get("http://exa mple.com").build().unwrap_err();
        let mapped: ShopfrontError = InfraError::from(error).into();
        assert!(
            matches!(mapped, ShopfrontError::Config(msg) if msg.starts_with("invalid HTTP client configuration"))
        );
    }

    #[test]
    fn toml_errors_map_to_config() {
        let err = toml::from_str::<toml::Table>("= nope").unwrap_err();
        let mapped: ShopfrontError = InfraError::from(err).into();
        assert!(matches!(mapped, ShopfrontError::Config(msg) if msg.starts_with("Invalid TOML")));
    }

    #[test]
    fn missing_file_maps_to_config() {
        let err = std::fs::read_to_string("/nonexistent/shopfront.toml").unwrap_err();
        let mapped: ShopfrontError = InfraError::from(err).into();
        assert!(matches!(mapped, ShopfrontError::Config(msg) if msg.contains("not found")));
    }
}
