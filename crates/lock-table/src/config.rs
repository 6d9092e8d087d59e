//! Configuration for the lock table

use serde::{Deserialize, Serialize};

/// Lock table configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LockTableConfig {
    /// Identifier handed out by the first successful grant.
    /// Later grants count up from here across every key.
    pub first_lock_id: u64,
}

impl Default for LockTableConfig {
    fn default() -> Self {
        Self { first_lock_id: 1 }
    }
}
