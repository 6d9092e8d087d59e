//! # Lock Server Runtime
//!
//! Wires the lock table to the lock gateway.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (from env)
//! 2. Create the lock table (the single source of truth for lock state)
//! 3. Create the gateway over a shared handle to the table
//! 4. Serve until shutdown is requested
//!
//! All lock state lives in memory and is gone when the process exits.

pub mod config;

use std::sync::Arc;

use lock_gateway::{GatewayError, LockGatewayService, ShutdownHandle};
use lock_table::{LockTableApi, LockTableService};
use thiserror::Error;
use tracing::info;

pub use config::ServerConfig;

/// Runtime errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// The lock server runtime.
pub struct LockServer {
    /// Lock table shared with the gateway.
    table: Arc<LockTableService>,
    /// HTTP front end.
    gateway: LockGatewayService,
}

impl LockServer {
    /// Create a new server from configuration.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let table = Arc::new(LockTableService::with_config(config.table));
        let gateway = LockGatewayService::new(config.gateway, table.clone())?;

        Ok(Self { table, gateway })
    }

    pub fn table(&self) -> Arc<LockTableService> {
        Arc::clone(&self.table)
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.gateway.shutdown_handle()
    }

    /// Serve until shutdown is triggered or a listener fails.
    pub async fn run(&self) -> Result<(), ServerError> {
        let config = self.gateway.config();
        info!("===========================================");
        info!("  lockd v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");
        info!("Lock Port: {}", config.http.port);
        if config.admin.enabled {
            info!("Admin Port: {}", config.admin.port);
        }

        self.gateway.start().await?;

        let stats = self.table.stats();
        info!(
            keys_tracked = stats.keys_tracked,
            grants_issued = stats.grants_issued,
            "Lock server stopped"
        );
        Ok(())
    }
}
