//! Request counters for the lock endpoints.
//!
//! Exposed as JSON on the admin `/metrics` route.

use crate::domain::reply::LockReply;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Lock gateway metrics
#[derive(Debug, Default)]
pub struct GatewayMetrics {
    pub requests_total: AtomicU64,

    // Replies by outcome
    pub granted: AtomicU64,
    pub retry: AtomicU64,
    pub success: AtomicU64,
    pub failure: AtomicU64,
    pub malformed: AtomicU64,

    // Latency tracking
    pub total_latency_us: AtomicU64,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one answered lock request
    pub fn record_reply(&self, reply: &LockReply, latency_us: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);

        let counter = match reply {
            LockReply::Granted(_) => &self.granted,
            LockReply::Retry => &self.retry,
            LockReply::Success => &self.success,
            LockReply::Failure => &self.failure,
            LockReply::Malformed => &self.malformed,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        self.total_latency_us.fetch_add(latency_us, Ordering::Relaxed);
    }

    /// Get average latency in microseconds
    pub fn average_latency_us(&self) -> f64 {
        let total = self.total_latency_us.load(Ordering::Relaxed);
        let count = self.requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Export metrics as JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "requests": {
                "total": self.requests_total.load(Ordering::Relaxed),
                "granted": self.granted.load(Ordering::Relaxed),
                "retry": self.retry.load(Ordering::Relaxed),
                "success": self.success.load(Ordering::Relaxed),
                "failure": self.failure.load(Ordering::Relaxed),
                "malformed": self.malformed.load(Ordering::Relaxed),
            },
            "latency": {
                "average_us": self.average_latency_us(),
            },
        })
    }
}

/// Measures one request from creation to `elapsed_us`
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_us(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}
