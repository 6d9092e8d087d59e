//! Core domain entities for the lock table

use super::errors::RejectReason;
use super::value_objects::{LockId, LockKind, LockMode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lock state of a single key.
///
/// Created on the first acquisition attempt for the key and kept for the
/// life of the table, even after it returns to `Unlocked`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LockRecord {
    mode: LockMode,
    holders: HashSet<LockId>,
}

impl LockRecord {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn from_parts(mode: LockMode, holders: impl IntoIterator<Item = LockId>) -> Self {
        Self {
            mode,
            holders: holders.into_iter().collect(),
        }
    }

    pub fn mode(&self) -> LockMode {
        self.mode
    }

    pub fn holders(&self) -> &HashSet<LockId> {
        &self.holders
    }

    pub fn holder_count(&self) -> usize {
        self.holders.len()
    }

    pub fn is_held_by(&self, id: LockId) -> bool {
        self.holders.contains(&id)
    }

    /// Whether a new grant of `kind` can be issued right now.
    pub fn can_grant(&self, kind: LockKind) -> bool {
        kind.is_compatible_with(self.mode)
    }

    /// Record a grant. The caller has already checked `can_grant`.
    pub(crate) fn grant(&mut self, kind: LockKind, id: LockId) {
        debug_assert!(self.can_grant(kind));
        self.mode = kind.held_mode();
        self.holders.insert(id);
    }

    /// Drop the grant `id` of `kind`, leaving the record untouched on mismatch.
    ///
    /// The last holder to leave puts the key back to `Unlocked`.
    pub(crate) fn release(&mut self, kind: LockKind, id: LockId) -> Result<(), RejectReason> {
        if self.mode != kind.held_mode() {
            return Err(RejectReason::ModeMismatch { held: self.mode });
        }
        if !self.holders.remove(&id) {
            return Err(RejectReason::NotAHolder);
        }
        if self.holders.is_empty() {
            self.mode = LockMode::Unlocked;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> LockSnapshot {
        let mut holders: Vec<LockId> = self.holders.iter().copied().collect();
        holders.sort_unstable();
        LockSnapshot {
            mode: self.mode,
            holders,
        }
    }
}

/// Point-in-time copy of a key's state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockSnapshot {
    pub mode: LockMode,
    /// Outstanding identifiers in ascending order.
    pub holders: Vec<LockId>,
}

/// Aggregate counters over the whole table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockTableStats {
    /// Keys that have ever been touched by an acquisition.
    pub keys_tracked: usize,
    /// Keys currently held exclusively.
    pub exclusive_keys: usize,
    /// Keys currently held by readers.
    pub shared_keys: usize,
    /// Outstanding shared grants across all keys.
    pub shared_holders: usize,
    /// Successful acquisitions since start.
    pub grants_issued: u64,
    /// Acquisitions answered busy since start.
    pub busy_outcomes: u64,
    /// Releases rejected since start.
    pub rejected_releases: u64,
}
