//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::{LockSnapshot, LockTableStats};
use crate::domain::errors::LockError;
use crate::domain::value_objects::{LockId, LockKind};

/// Primary lock table API
///
/// Every call is answered immediately. An acquisition that cannot be
/// granted returns [`LockError::Busy`] instead of waiting, and a release
/// that does not match an outstanding grant returns [`LockError::Rejected`]
/// without touching state.
pub trait LockTableApi: Send + Sync {
    /// Grant an exclusive lock on `key` if nobody holds it.
    fn acquire_exclusive(&self, key: &str) -> Result<LockId, LockError>;

    /// Release an exclusive grant previously returned for `key`.
    fn release_exclusive(&self, key: &str, id: LockId) -> Result<(), LockError>;

    /// Grant a shared lock on `key` unless a writer holds it.
    fn acquire_shared(&self, key: &str) -> Result<LockId, LockError>;

    /// Release one shared grant on `key`. The last reader unlocks the key.
    fn release_shared(&self, key: &str, id: LockId) -> Result<(), LockError>;

    /// Current state of `key`, or `None` if it was never touched.
    fn inspect(&self, key: &str) -> Option<LockSnapshot>;

    /// Aggregate counters over the whole table.
    fn stats(&self) -> LockTableStats;

    /// Dispatch an acquisition by kind.
    fn acquire(&self, kind: LockKind, key: &str) -> Result<LockId, LockError> {
        match kind {
            LockKind::Exclusive => self.acquire_exclusive(key),
            LockKind::Shared => self.acquire_shared(key),
        }
    }

    /// Dispatch a release by kind.
    fn release(&self, kind: LockKind, key: &str, id: LockId) -> Result<(), LockError> {
        match kind {
            LockKind::Exclusive => self.release_exclusive(key, id),
            LockKind::Shared => self.release_shared(key, id),
        }
    }
}
