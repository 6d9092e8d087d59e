//! # lockd
//!
//! Network-accessible advisory lock service.
//!
//! ```text
//! POST http://localhost:8090/lock?key=PATH
//! POST http://localhost:8090/unlock?key=PATH&lock-id=ID
//! POST http://localhost:8090/rlock?key=PATH
//! POST http://localhost:8090/runlock?key=PATH&lock-id=ID
//! ```

use anyhow::{Context, Result};
use tracing::{error, info};

use lock_server::{LockServer, ServerConfig};
use lock_telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let _telemetry = init_telemetry(TelemetryConfig::from_env())
        .context("Failed to initialize logging")?;

    // Load configuration
    let config = ServerConfig::from_env();

    let server = LockServer::new(config).context("Invalid server configuration")?;

    // Stop serving on Ctrl+C
    let shutdown = server.shutdown_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received shutdown signal"),
            Err(e) => error!(error = %e, "Failed to listen for Ctrl+C"),
        }
        shutdown.trigger();
    });

    info!("Lock server is running. Press Ctrl+C to stop.");
    server.run().await.context("Lock server failed")?;

    Ok(())
}
