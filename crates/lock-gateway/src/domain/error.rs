//! Gateway error types.

use std::net::SocketAddr;
use thiserror::Error;

use super::config::ConfigError;

/// Gateway lifecycle errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server socket bind error
    #[error("failed to bind {listener} listener on {addr}: {source}")]
    Bind {
        listener: &'static str,
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Server stopped with an I/O error
    #[error("{listener} server failed: {source}")]
    Serve {
        listener: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Server task panicked or was cancelled
    #[error("server task failed: {0}")]
    Task(String),
}

/// Result alias for gateway lifecycle operations
pub type GatewayResult<T> = Result<T, GatewayError>;
