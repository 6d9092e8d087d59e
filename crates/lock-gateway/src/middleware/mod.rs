//! Middleware for the lock gateway.

pub mod metrics;
pub mod tracing;

pub use metrics::{GatewayMetrics, RequestTimer};
pub use tracing::TracingLayer;
