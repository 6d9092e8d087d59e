//! Application layer for the lock table

pub mod service;

pub use service::LockTableService;
