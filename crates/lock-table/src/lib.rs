//! # Lock Table
//!
//! The authoritative in-memory state of the lock service: a mapping from key
//! to lock record plus the process-wide identifier counter, guarded by a
//! single critical section.
//!
//! ## Architecture
//!
//! - **Domain**: Lock records, modes, identifiers, errors and invariants
//! - **Ports**: Inbound `LockTableApi` used by the transport layer
//! - **Application**: `LockTableService`, the mutex-guarded implementation
//!
//! ## State Machine (per key)
//!
//! ```text
//!            acquire_exclusive                 acquire_shared
//!   ┌──────────────────────────┐   ┌──────────────────────────────────┐
//!   │                          ▼   │                                  ▼
//! EXCLUSIVE ◄──────────── UNLOCKED ─────────────────────────────► SHARED ──┐
//!   │                          ▲   ▲                                  │    │ acquire_shared /
//!   └──────────────────────────┘   └──────────────────────────────────┘    │ release_shared
//!        release_exclusive           release_shared (last holder)     ◄────┘ (holders left)
//! ```
//!
//! Acquisition never waits: an incompatible key answers `LockError::Busy`
//! and the caller polls again.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::service::LockTableService;
pub use config::LockTableConfig;
pub use domain::entities::{LockRecord, LockSnapshot, LockTableStats};
pub use domain::errors::{LockError, RejectReason};
pub use domain::value_objects::{LockId, LockKind, LockMode};
pub use ports::inbound::LockTableApi;
