//! Value objects for the lock table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability returned by a successful acquisition.
///
/// Identifiers come from one counter shared by every key, so no two grants
/// in the life of the process carry the same value. They carry no key
/// information: a release must name the key again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockId(u64);

impl LockId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for LockId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for LockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current state of a key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockMode {
    /// No outstanding grants.
    #[default]
    Unlocked,
    /// Exactly one writer holds the key.
    Exclusive,
    /// One or more readers hold the key.
    Shared,
}

impl LockMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockMode::Unlocked => "unlocked",
            LockMode::Exclusive => "exclusive",
            LockMode::Shared => "shared",
        }
    }
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of grant a caller asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockKind {
    Exclusive,
    Shared,
}

impl LockKind {
    /// Mode the key is in while a grant of this kind is outstanding.
    pub fn held_mode(self) -> LockMode {
        match self {
            LockKind::Exclusive => LockMode::Exclusive,
            LockKind::Shared => LockMode::Shared,
        }
    }

    /// Whether a grant of this kind can be issued while the key is in `mode`.
    pub fn is_compatible_with(self, mode: LockMode) -> bool {
        match (self, mode) {
            (_, LockMode::Unlocked) => true,
            (LockKind::Shared, LockMode::Shared) => true,
            _ => false,
        }
    }
}

impl fmt::Display for LockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.held_mode().as_str())
    }
}
