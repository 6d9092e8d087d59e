//! Lock Table Service
//!
//! Mutex-guarded implementation of `LockTableApi`.
//!
//! The record map, the identifier counter and the outcome counters live
//! together behind one `parking_lot::Mutex`. Each operation takes the lock
//! once, performs its whole read-modify-write, and releases it before
//! logging. Nothing inside the critical section blocks or does I/O.

use crate::config::LockTableConfig;
use crate::domain::entities::{LockRecord, LockSnapshot, LockTableStats};
use crate::domain::errors::{LockError, RejectReason};
use crate::domain::invariants;
use crate::domain::value_objects::{LockId, LockKind, LockMode};
use crate::ports::inbound::LockTableApi;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

/// State guarded by the table's single mutex
#[derive(Debug)]
struct TableState {
    records: HashMap<String, LockRecord>,
    /// `None` once the identifier space is used up
    next_id: Option<u64>,
    grants_issued: u64,
    busy_outcomes: u64,
    rejected_releases: u64,
}

impl TableState {
    fn new(first_lock_id: u64) -> Self {
        Self {
            records: HashMap::new(),
            next_id: Some(first_lock_id),
            grants_issued: 0,
            busy_outcomes: 0,
            rejected_releases: 0,
        }
    }

    fn try_grant(&mut self, kind: LockKind, key: &str) -> Result<LockId, LockError> {
        let record = self.records.entry(key.to_owned()).or_default();

        // An exhausted counter can never grant again, so it reads as busy.
        let next = match self.next_id {
            Some(next) if record.can_grant(kind) => next,
            _ => {
                self.busy_outcomes += 1;
                return Err(LockError::Busy {
                    key: key.to_owned(),
                    held: record.mode(),
                });
            }
        };

        let id = LockId::new(next);
        self.next_id = next.checked_add(1);
        record.grant(kind, id);
        self.grants_issued += 1;

        debug_assert!(invariants::invariant_mode_matches_holders(record));
        debug_assert!(invariants::invariant_single_owner(&self.records));
        Ok(id)
    }

    fn try_release(&mut self, kind: LockKind, key: &str, id: LockId) -> Result<(), LockError> {
        let result = match self.records.get_mut(key) {
            Some(record) => {
                let result = record.release(kind, id);
                debug_assert!(invariants::invariant_mode_matches_holders(record));
                result
            }
            None => Err(RejectReason::UnknownKey),
        };
        debug_assert!(invariants::invariant_single_owner(&self.records));

        result.map_err(|reason| {
            self.rejected_releases += 1;
            LockError::Rejected {
                key: key.to_owned(),
                id,
                reason,
            }
        })
    }

    fn stats(&self) -> LockTableStats {
        let mut stats = LockTableStats {
            keys_tracked: self.records.len(),
            grants_issued: self.grants_issued,
            busy_outcomes: self.busy_outcomes,
            rejected_releases: self.rejected_releases,
            ..LockTableStats::default()
        };

        for record in self.records.values() {
            match record.mode() {
                LockMode::Exclusive => stats.exclusive_keys += 1,
                LockMode::Shared => {
                    stats.shared_keys += 1;
                    stats.shared_holders += record.holder_count();
                }
                LockMode::Unlocked => {}
            }
        }

        stats
    }
}

/// Lock Table Service
///
/// One instance is the single source of truth for lock state. Construct it
/// once, wrap it in an `Arc`, and hand clones of the handle to whatever
/// serves requests.
pub struct LockTableService {
    config: LockTableConfig,
    state: Mutex<TableState>,
}

impl LockTableService {
    /// Create a new table with default config
    pub fn new() -> Self {
        Self::with_config(LockTableConfig::default())
    }

    /// Create a new table with custom config
    pub fn with_config(config: LockTableConfig) -> Self {
        let state = Mutex::new(TableState::new(config.first_lock_id));
        Self { config, state }
    }

    pub fn config(&self) -> &LockTableConfig {
        &self.config
    }

    /// Check every table-wide invariant under the lock.
    pub fn check_invariants(&self) -> bool {
        let state = self.state.lock();
        invariants::check_table(&state.records, self.config.first_lock_id, state.next_id)
    }

    fn grant(&self, kind: LockKind, key: &str) -> Result<LockId, LockError> {
        let outcome = self.state.lock().try_grant(kind, key);

        match &outcome {
            Ok(id) => debug!(key, lock_id = %id, mode = %kind, "Lock granted"),
            Err(err) => debug!(key, mode = %kind, error = %err, "Lock busy"),
        }

        outcome
    }

    fn release_grant(&self, kind: LockKind, key: &str, id: LockId) -> Result<(), LockError> {
        let outcome = self.state.lock().try_release(kind, key, id);

        match &outcome {
            Ok(()) => debug!(key, lock_id = %id, mode = %kind, "Lock released"),
            Err(err) => debug!(key, lock_id = %id, mode = %kind, error = %err, "Release rejected"),
        }

        outcome
    }
}

impl Default for LockTableService {
    fn default() -> Self {
        Self::new()
    }
}

impl LockTableApi for LockTableService {
    fn acquire_exclusive(&self, key: &str) -> Result<LockId, LockError> {
        self.grant(LockKind::Exclusive, key)
    }

    fn release_exclusive(&self, key: &str, id: LockId) -> Result<(), LockError> {
        self.release_grant(LockKind::Exclusive, key, id)
    }

    fn acquire_shared(&self, key: &str) -> Result<LockId, LockError> {
        self.grant(LockKind::Shared, key)
    }

    fn release_shared(&self, key: &str, id: LockId) -> Result<(), LockError> {
        self.release_grant(LockKind::Shared, key, id)
    }

    fn inspect(&self, key: &str) -> Option<LockSnapshot> {
        self.state.lock().records.get(key).map(LockRecord::snapshot)
    }

    fn stats(&self) -> LockTableStats {
        self.state.lock().stats()
    }
}
