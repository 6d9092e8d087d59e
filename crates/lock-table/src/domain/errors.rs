//! Error types for the lock table
//!
//! Both variants are ordinary outcomes rather than faults: the table is
//! never left in a different state when one is returned.

use super::value_objects::{LockId, LockMode};
use thiserror::Error;

/// Outcome of an acquisition or release that did not go through
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// The key is held in an incompatible mode; poll again later
    #[error("Key {key:?} is busy: held {held}")]
    Busy { key: String, held: LockMode },

    /// The key/identifier pair is not an outstanding grant
    #[error("Release of {id} on {key:?} rejected: {reason}")]
    Rejected {
        key: String,
        id: LockId,
        reason: RejectReason,
    },
}

impl LockError {
    pub fn is_busy(&self) -> bool {
        matches!(self, LockError::Busy { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, LockError::Rejected { .. })
    }
}

/// Why a release was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// No acquisition was ever attempted on the key
    #[error("unknown key")]
    UnknownKey,

    /// The key is not held in the mode being released
    #[error("key is {held}")]
    ModeMismatch { held: LockMode },

    /// The identifier is not among the key's holders
    #[error("identifier does not hold the key")]
    NotAHolder,
}
