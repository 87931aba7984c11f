//! Configuration loader
//!
//! Loads [`AppConfig`] from a config file and environment variables.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file from the working directory, if present
//! 2. Searches the standard locations for a config file (JSON or TOML)
//! 3. Starts from the file's values, or the defaults when none is found
//! 4. Applies environment variable overrides on top
//!
//! ## Environment Variables
//! - `SHOPFRONT_PLATFORM`: `web`, `ios`, `android`, `windows` or `macos`
//! - `SHOPFRONT_API_URL`: explicit backend base URL
//! - `SHOPFRONT_API_PORT`: port used by the platform default URL
//! - `SHOPFRONT_REQUEST_TIMEOUT_MS`: fixed request timeout in milliseconds
//! - `SHOPFRONT_DEV_MODE`: enables every log level (true/false)
//! - `SHOPFRONT_LOG_TARGET`: `ansi` or `console`
//! - `SHOPFRONT_APP_NAME`: scope printed on every log record
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./shopfront.json` or `./shopfront.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. The same names relative to the executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use shopfront_domain::{Result, ShopfrontError};

use super::app_config::AppConfig;
use crate::errors::InfraError;

pub const ENV_PLATFORM: &str = "SHOPFRONT_PLATFORM";
pub const ENV_API_URL: &str = "SHOPFRONT_API_URL";
pub const ENV_API_PORT: &str = "SHOPFRONT_API_PORT";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "SHOPFRONT_REQUEST_TIMEOUT_MS";
pub const ENV_DEV_MODE: &str = "SHOPFRONT_DEV_MODE";
pub const ENV_LOG_TARGET: &str = "SHOPFRONT_LOG_TARGET";
pub const ENV_APP_NAME: &str = "SHOPFRONT_APP_NAME";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["shopfront.json", "shopfront.toml", "config.json", "config.toml"];

/// Load configuration from the first config file found, then the environment.
///
/// # Errors
/// Returns `ShopfrontError::Config` if a config file exists but cannot be
/// parsed, or an environment variable holds an invalid value.
pub fn load() -> Result<AppConfig> {
    load_dotenv();

    let base = match find_config_file() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, starting from defaults");
            AppConfig::default()
        }
    };

    let config = apply_overrides(base, env_lookup)?;
    tracing::info!(
        platform = %config.platform,
        dev_mode = config.dev_mode,
        log_target = %config.log_target,
        "Configuration loaded"
    );
    Ok(config)
}

/// Load configuration from an arbitrary variable source over the defaults.
///
/// `lookup` receives the variable name and returns its value, if set.
pub fn load_from_lookup<F>(lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    apply_overrides(AppConfig::default(), lookup)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches the standard locations. Supports both JSON and
/// TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ShopfrontError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ShopfrontError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => find_config_file().ok_or_else(|| {
            ShopfrontError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path).map_err(to_domain)?;
    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`); files without
/// an extension are read as JSON.
fn parse_config(contents: &str, path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(to_domain),
        "json" => serde_json::from_str(contents).map_err(to_domain),
        _ => Err(ShopfrontError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Search the standard paths for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn find_config_file() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.is_file())
}

fn apply_overrides<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(raw) = var(ENV_PLATFORM) {
        config.platform = parse_var(ENV_PLATFORM, &raw)?;
    }
    if let Some(raw) = var(ENV_API_URL) {
        config.api_url = Some(raw);
    }
    if let Some(raw) = var(ENV_API_PORT) {
        config.api_port = parse_var(ENV_API_PORT, &raw)?;
    }
    if let Some(raw) = var(ENV_REQUEST_TIMEOUT_MS) {
        config.request_timeout_ms = parse_var(ENV_REQUEST_TIMEOUT_MS, &raw)?;
    }
    if let Some(raw) = var(ENV_DEV_MODE) {
        config.dev_mode = parse_bool(&raw).ok_or_else(|| {
            ShopfrontError::Config(format!("Invalid {ENV_DEV_MODE}: expected a boolean, got '{raw}'"))
        })?;
    }
    if let Some(raw) = var(ENV_LOG_TARGET) {
        config.log_target = parse_var(ENV_LOG_TARGET, &raw)?;
    }
    if let Some(raw) = var(ENV_APP_NAME) {
        config.app_name = raw;
    }

    config.validate()?;
    Ok(config)
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ShopfrontError::Config(format!("Invalid {key}: {e}")))
}

/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "Ignoring unreadable .env file"),
    }
}

fn to_domain<E>(err: E) -> ShopfrontError
where
    InfraError: From<E>,
{
    InfraError::from(err).into()
}
