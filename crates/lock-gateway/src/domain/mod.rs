//! Domain types for the lock gateway.

pub mod config;
pub mod error;
pub mod params;
pub mod reply;
