//! # Structured Logging Module
//!
//! Environment-aware structured logging that writes to the console and,
//! when a log directory is configured, to a JSON log file.

use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;

use crate::config::InveniraConfig;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();
static FILE_WRITER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_structured_logging(config: &InveniraConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter_directive = resolve_filter_directive(config);

        let mut file_setup_error = None;
        let mut log_path = None;
        let file_layer = match config.logging.directory.as_deref() {
            Some(directory) => {
                let log_dir = PathBuf::from(directory);
                match fs::create_dir_all(&log_dir) {
                    Ok(()) => {
                        let file_name = log_file_name(&config.environment);
                        log_path = Some(log_dir.join(&file_name));
                        let file_appender = tracing_appender::rolling::never(&log_dir, file_name);
                        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
                        let _ = FILE_WRITER_GUARD.set(guard);

                        Some(
                            fmt::layer()
                                .with_writer(file_writer)
                                .with_target(true)
                                .with_thread_ids(true)
                                .with_level(true)
                                .with_ansi(false)
                                .json()
                                .with_filter(EnvFilter::new(filter_directive.clone())),
                        )
                    }
                    Err(e) => {
                        file_setup_error = Some(format!("{}: {e}", log_dir.display()));
                        None
                    }
                }
            }
            None => None,
        };

        let subscriber = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_level(true)
                    .with_ansi(!config.is_production())
                    .with_filter(EnvFilter::new(filter_directive.clone())),
            )
            .with(file_layer);

        if subscriber.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        if let Some(reason) = file_setup_error {
            tracing::warn!(reason = %reason, "Could not create log directory, logging to console only");
        }

        tracing::info!(
            pid = process::id(),
            environment = %config.environment,
            filter = %filter_directive,
            log_file = ?log_path.as_ref().map(|p| p.display().to_string()),
            "🔧 STRUCTURED LOGGING: Initialized"
        );
    });
}

/// Explicit configuration wins, then `RUST_LOG`, then the environment default
fn resolve_filter_directive(config: &InveniraConfig) -> String {
    config
        .logging
        .level
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| default_log_level(&config.environment).to_string())
}

fn default_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

fn log_file_name(environment: &str) -> String {
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    format!("{}.{}.{}.log", environment, process::id(), timestamp)
}

/// Log structured data for a remote Activity Provider call
pub fn log_provider_operation(
    operation: &str,
    provider_url: &str,
    activity_uuid: Option<Uuid>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        provider_url = %provider_url,
        activity_uuid = ?activity_uuid,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "🔌 PROVIDER_OPERATION"
    );
}

/// Log structured data for an IAP lifecycle operation
pub fn log_iap_operation(
    operation: &str,
    iap_uuid: Option<Uuid>,
    caller: &str,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        iap_uuid = ?iap_uuid,
        caller = %caller,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "📋 IAP_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "❌ ERROR"
    );
}
