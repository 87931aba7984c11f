use std::time::Duration;

use serde::{Deserialize, Serialize};
use shopfront_common::{Logger, RenderTarget};
use shopfront_core::resolve_base_url_with_port;
use shopfront_domain::constants::{DEFAULT_API_PORT, DEFAULT_APP_NAME, DEFAULT_REQUEST_TIMEOUT_MS};
use shopfront_domain::{EndpointConfig, Platform, Result, ShopfrontError};

/// Process-wide client settings.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub platform: Platform,
    /// Explicit backend URL; the platform default is used when absent.
    pub api_url: Option<String>,
    pub api_port: u16,
    pub request_timeout_ms: u64,
    /// Development mode enables every log level; otherwise only errors.
    pub dev_mode: bool,
    #[serde(with = "render_target_text")]
    pub log_target: RenderTarget,
    /// Scope printed on every log record.
    pub app_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            api_url: None,
            api_port: DEFAULT_API_PORT,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            dev_mode: cfg!(debug_assertions),
            log_target: RenderTarget::default(),
            app_name: DEFAULT_APP_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Reject values that would make the client unusable.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_ms == 0 {
            return Err(ShopfrontError::Config(
                "request_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.api_port == 0 {
            return Err(ShopfrontError::Config("api_port must be greater than zero".to_string()));
        }
        if self.app_name.trim().is_empty() {
            return Err(ShopfrontError::Config("app_name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Resolve the backend base URL and build the endpoint table.
    pub fn endpoint_config(&self) -> EndpointConfig {
        EndpointConfig::new(resolve_base_url_with_port(
            self.platform,
            self.api_url.as_deref(),
            self.api_port,
        ))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Logger scoped to the application name, writing to standard error.
    pub fn logger(&self) -> Logger {
        Logger::new(self.app_name.as_str(), self.dev_mode, self.log_target)
    }
}

/// `RenderTarget` as its short textual form (`ansi` / `console`).
mod render_target_text {
    use serde::{Deserialize, Deserializer, Serializer};
    use shopfront_common::RenderTarget;

    pub fn serialize<S: Serializer>(target: &RenderTarget, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(target)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RenderTarget, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
