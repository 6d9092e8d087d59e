//! Domain invariants for the lock table
//!
//! Checked with `debug_assert!` after every mutation and exercised directly
//! by the property tests.

use super::entities::LockRecord;
use super::value_objects::{LockId, LockMode};
use std::collections::{HashMap, HashSet};

/// INVARIANT-1..3: Mode agrees with the holder set.
///
/// - `Exclusive` has exactly one holder
/// - `Shared` has at least one holder
/// - `Unlocked` has none
pub fn invariant_mode_matches_holders(record: &LockRecord) -> bool {
    match record.mode() {
        LockMode::Exclusive => record.holder_count() == 1,
        LockMode::Shared => record.holder_count() >= 1,
        LockMode::Unlocked => record.holder_count() == 0,
    }
}

/// INVARIANT-4: An outstanding identifier belongs to exactly one key.
pub fn invariant_single_owner(records: &HashMap<String, LockRecord>) -> bool {
    let mut seen: HashSet<LockId> = HashSet::new();

    for record in records.values() {
        for id in record.holders() {
            if !seen.insert(*id) {
                return false;
            }
        }
    }

    true
}

/// INVARIANT-5: Every outstanding identifier came from the shared counter,
/// i.e. lies in `[first, next)`. A `next` of `None` means the counter is
/// exhausted and the range is open above.
pub fn invariant_issued_by_counter(
    records: &HashMap<String, LockRecord>,
    first: u64,
    next: Option<u64>,
) -> bool {
    records
        .values()
        .flat_map(|record| record.holders().iter())
        .all(|id| id.value() >= first && next.is_none_or(|next| id.value() < next))
}

/// All table-wide invariants at once.
pub fn check_table(
    records: &HashMap<String, LockRecord>,
    first: u64,
    next: Option<u64>,
) -> bool {
    records.values().all(invariant_mode_matches_holders)
        && invariant_single_owner(records)
        && invariant_issued_by_counter(records, first, next)
}
