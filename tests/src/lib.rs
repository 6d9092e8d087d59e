//! # lockd Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # Gateway on an ephemeral port + HTTP client
//! └── integration/
//!     ├── flows.rs       # Acquire/release sequences over HTTP
//!     ├── server.rs      # Full LockServer runtime from env-style config
//!     ├── transport.rs   # Parameter handling, status codes, admin endpoints
//!     └── concurrency.rs # Many clients racing for the same keys
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p lock-tests
//!
//! # By category
//! cargo test -p lock-tests integration::flows
//! cargo test -p lock-tests integration::concurrency
//!
//! # Benchmarks
//! cargo bench -p lock-tests
//! ```

#![allow(dead_code)]

pub mod harness;
