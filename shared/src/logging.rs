//! Shared logging utilities for consistent tracing across all workers

use crate::types::WorkerId;
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Default filter level when neither `--log-level` nor `RUST_LOG` says otherwise
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Build the filter directive for the workspace crates at the given level
pub fn filter_directive(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or(DEFAULT_LOG_LEVEL);
    format!("orchestrator={base_level},producer={base_level},shared={base_level}")
}

/// Initialize the tracing subscriber with an optional log level.
///
/// Events go to stderr so stdout carries only program output. `RUST_LOG`
/// overrides the level when set. Calling this more than once is harmless.
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(log_level)));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(true)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for worker-aware info logging
#[macro_export]
macro_rules! worker_info {
    ($worker_id:expr, $($arg:tt)*) => {
        tracing::info!(
            worker = %$worker_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for worker-aware debug logging
#[macro_export]
macro_rules! worker_debug {
    ($worker_id:expr, $($arg:tt)*) => {
        tracing::debug!(
            worker = %$worker_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(worker_id: &WorkerId, details: &str) {
    info!(
        worker = %worker_id,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for shutdown messages
pub fn log_shutdown(worker_id: &WorkerId, reason: &str) {
    info!(
        worker = %worker_id,
        timestamp = format_timestamp(),
        "🛑 Shutting down: {}",
        reason
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(worker_id: &WorkerId, context: &str, error: &dyn std::fmt::Display) {
    error!(
        worker = %worker_id,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(worker_id: &WorkerId, message: &str) {
    info!(
        worker = %worker_id,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}
