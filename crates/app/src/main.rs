//! Connectivity check for the shop backend.
//!
//! Run with: `shopfront-check <command>`
//!
//! Loads the client configuration the same way the app does, resolves the
//! backend URL for the configured platform and calls the service endpoints
//! through the instrumented client.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use anyhow::{anyhow, Context};
use serde_json::json;
use shopfront_common::observability::logger::log_data;
use shopfront_common::Logger;
use shopfront_infra::{config, ApiClient, ApiErrorCategory, AppConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let task = std::env::args().nth(1);
    if matches!(task.as_deref(), Some("help") | Some("--help") | Some("-h")) {
        print_help();
        return ExitCode::SUCCESS;
    }

    let config = match config::load().context("failed to load configuration") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };
    let logger = config.logger();
    tracing::debug!(task = task.as_deref().unwrap_or("health"), "running check");

    let result = match task.as_deref() {
        Some("config") => show_config(&config, &logger),
        Some("health") | None => run_health(&config, &logger).await,
        Some("logs") => run_logs(&config, &logger).await,
        Some(unknown) => {
            eprintln!("Unknown command: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow!("Unknown command"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger.error("Check failed", log_data(json!({ "error": format!("{e:#}") })));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn show_config(config: &AppConfig, logger: &Logger) -> anyhow::Result<()> {
    let endpoints = config.endpoint_config();
    let paths: serde_json::Map<String, serde_json::Value> = endpoints
        .endpoints()
        .map(|(endpoint, path)| (endpoint.to_string(), json!(path)))
        .collect();

    logger.info(
        "Resolved configuration",
        log_data(json!({
            "platform": config.platform.to_string(),
            "baseUrl": endpoints.base_url(),
            "timeout": format!("{}ms", config.request_timeout_ms),
            "devMode": config.dev_mode,
            "logTarget": config.log_target.to_string(),
            "endpoints": paths,
        })),
    );
    Ok(())
}

async fn run_health(config: &AppConfig, logger: &Logger) -> anyhow::Result<()> {
    let api = ApiClient::from_config(config).context("failed to build API client")?;
    let health = api.health().await.context("health check request failed")?;

    if health.is_healthy() {
        logger.success(
            "Backend is healthy",
            log_data(json!({ "baseUrl": api.http().base_url(), "services": health.services })),
        );
        return Ok(());
    }

    let failing: serde_json::Map<String, serde_json::Value> =
        health.failing_services().map(|(name, verdict)| (name.to_string(), json!(verdict))).collect();
    logger.warn("Backend reports degraded services", log_data(json!({ "failing": failing })));
    Err(anyhow!("backend status is '{}'", health.status))
}

async fn run_logs(config: &AppConfig, logger: &Logger) -> anyhow::Result<()> {
    let api = ApiClient::from_config(config).context("failed to build API client")?;

    let page = match api.recent_logs().await {
        Ok(page) => page,
        Err(e) => {
            let hint = match e.category() {
                ApiErrorCategory::Authentication => "Logs are only available in development mode.",
                ApiErrorCategory::NotFound => "Log file not found.",
                _ => "Unable to fetch logs. Please try again later.",
            };
            return Err(anyhow::Error::new(e).context(hint));
        }
    };

    logger.info(
        format!("Showing {} of {} lines", page.showing, page.total_lines),
        page.message.as_ref().and_then(|message| log_data(json!({ "message": message }))),
    );
    for line in &page.logs {
        println!("{line}");
    }
    Ok(())
}

fn print_help() {
    println!("shopfront-check: check connectivity to the shop backend");
    println!();
    println!("USAGE:");
    println!("    shopfront-check [command]");
    println!();
    println!("COMMANDS:");
    println!("    health    Call /api/health/ and report service status (default)");
    println!("    logs      Print the tail of the backend log (development backends)");
    println!("    config    Show the resolved configuration and endpoints");
    println!("    help      Show this help");
    println!();
    println!("CONFIGURATION:");
    println!("    shopfront.{{json,toml}} or config.{{json,toml}}, overridden by");
    println!("    SHOPFRONT_PLATFORM, SHOPFRONT_API_URL, SHOPFRONT_API_PORT,");
    println!("    SHOPFRONT_REQUEST_TIMEOUT_MS, SHOPFRONT_DEV_MODE,");
    println!("    SHOPFRONT_LOG_TARGET and SHOPFRONT_APP_NAME");
}
