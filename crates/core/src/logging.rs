//! Unified logging
//!
//! Installs a `tracing` subscriber once per process. The filter defaults to
//! `info` and follows `RUST_LOG` when set, so request URLs and response
//! bodies (logged at `debug`) stay quiet unless asked for.

use tracing_subscriber::{EnvFilter, FmtSubscriber};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system. Safe to call more than once.
pub fn init_logging() {
    INIT.call_once(|| {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info"))
            )
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .finish();

        // Another subscriber may already be installed by the host application.
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            return;
        }

        tracing::info!("📝 Initialized tracing logging");
    });
}

#[macro_export]
macro_rules! log_request {
    ($endpoint:expr, $url:expr) => {
        tracing::debug!("📡 {} GET {}", $endpoint, $url);
    };
}

#[macro_export]
macro_rules! log_error {
    ($operation:expr, $error:expr) => {
        tracing::error!("❌ {} failed: {}", $operation, $error);
    };
}
