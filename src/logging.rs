//! # Structured Logging Module
//!
//! Environment-aware structured logging for status classification. Console
//! output is human readable in development and JSON in production.

use crate::status::CoreStatus;
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    let environment = get_environment();
    let level = get_log_level(&environment);
    init_logging_with(level, environment == "production");
}

/// Initialize logging with an explicit level and output format.
///
/// `RUST_LOG` takes precedence over `level` when set. Only the first call in
/// a process installs a subscriber.
pub fn init_logging_with(level: &str, json: bool) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let console = if json {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(true)
                .boxed()
        };

        // A global subscriber may already be installed by the embedding process
        if tracing_subscriber::registry()
            .with(console.with_filter(filter))
            .try_init()
            .is_err()
        {
            tracing::debug!("Global tracing subscriber already initialized, keeping it");
        }

        tracing::info!(
            pid = std::process::id(),
            level = %level,
            json = json,
            "Structured logging initialized"
        );
    });
}

/// Level `verbosity` steps more verbose than `configured`, capped at `trace`.
///
/// Unknown levels are treated as `warn`.
pub fn raise_level(configured: &str, verbosity: u8) -> &'static str {
    const ORDER: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
    let start = ORDER
        .iter()
        .position(|level| level.eq_ignore_ascii_case(configured))
        .unwrap_or(1);
    ORDER[(start + usize::from(verbosity)).min(ORDER.len() - 1)]
}

/// Get current environment from environment variables
pub fn get_environment() -> String {
    std::env::var("CI_STATUS_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
pub fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        "test" => "warn",
        _ => "debug",
    }
}

/// Log structured data for a composite classification
pub fn log_composite_evaluation(
    project_id: Option<i64>,
    dag: bool,
    distinct_statuses: usize,
    status: Option<CoreStatus>,
    warnings: bool,
) {
    tracing::debug!(
        operation = "composite",
        project_id = project_id,
        dag = dag,
        distinct_statuses = distinct_statuses,
        status = status.map(|status| status.as_str()),
        warnings = warnings,
        timestamp = %Utc::now().to_rfc3339(),
        "COMPOSITE_STATUS"
    );
}

/// Log structured data for a status decoration
pub fn log_status_fabrication(core: CoreStatus, group: &str, extended: &[&'static str]) {
    tracing::debug!(
        operation = "fabricate",
        core = %core,
        group = %group,
        extended = ?extended,
        timestamp = %Utc::now().to_rfc3339(),
        "STATUS_FABRICATED"
    );
}

/// Log an error with full context
pub fn log_error(component: &str, operation: &str, error: &str) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}
