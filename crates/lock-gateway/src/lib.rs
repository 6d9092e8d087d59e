//! Lock Gateway - HTTP interface to the lock table.
//!
//! Translates query-string requests into lock table calls and answers each
//! with a single line of plain text.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     LOCK GATEWAY                         │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌──────────────────────────┐  ┌────────────────────┐    │
//! │  │   HTTP (default :8090)   │  │  Admin (:8091)     │    │
//! │  │ /lock /unlock            │  │  /health /metrics  │    │
//! │  │ /rlock /runlock /health  │  │  (off by default)  │    │
//! │  └────────────┬─────────────┘  └─────────┬──────────┘    │
//! │               │ TracingLayer             │               │
//! │  ┌────────────┴──────────────┐           │               │
//! │  │ params → LockTableApi →   │           │               │
//! │  │ LockReply (line of text)  │           │               │
//! │  └────────────┬──────────────┘           │               │
//! └───────────────┼──────────────────────────┼───────────────┘
//!                 ▼                          ▼
//!            Arc<dyn LockTableApi>    LockTableStats
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use lock_gateway::{GatewayConfig, LockGatewayService};
//! use lock_table::LockTableService;
//!
//! let locks = Arc::new(LockTableService::new());
//! let service = LockGatewayService::new(GatewayConfig::default(), locks)?;
//! service.start().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod middleware;
pub mod router;
pub mod service;

// Re-exports for public API
pub use domain::config::{AdminConfig, ConfigError, GatewayConfig, HttpConfig};
pub use domain::error::{GatewayError, GatewayResult};
pub use domain::params::{ParamError, QueryParams};
pub use domain::reply::LockReply;
pub use middleware::GatewayMetrics;
pub use router::AppState;
pub use service::{LockGatewayService, ShutdownHandle};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
