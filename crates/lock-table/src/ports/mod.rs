//! Ports module for the lock table
//!
//! The table has no outbound dependencies; only the driving API is defined.

pub mod inbound;

pub use inbound::LockTableApi;
