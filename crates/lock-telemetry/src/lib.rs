//! # Lock Telemetry
//!
//! Logging setup shared by the lock service binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lock_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LOCKD_SERVICE_NAME` | `lockd` | Service name in startup logs |
//! | `LOCKD_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directive |
//! | `LOCKD_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `LOCKD_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::build_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter {0}")]
    Filter(String),

    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Initialize logging for the process.
///
/// Returns a guard to hold for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    logging::init_logging(&config)?;

    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}
