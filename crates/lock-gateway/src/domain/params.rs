//! Query parameter extraction for the lock endpoints.
//!
//! Requests carry `key` and, for releases, `lock-id` in the query string.
//! The first occurrence of a name wins and a present-but-empty value still
//! counts as present.

use lock_table::LockId;
use serde::Deserialize;
use thiserror::Error;

pub const KEY_PARAM: &str = "key";
pub const LOCK_ID_PARAM: &str = "lock-id";

/// Ordered query pairs as they appeared on the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value for `name`, if the parameter is present at all
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Why a request never reached the lock table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// A required parameter was absent (or `lock-id` was empty)
    #[error("missing parameter: {0}")]
    Missing(&'static str),

    /// `lock-id` was not a decimal integer
    #[error("malformed lock-id: {0:?}")]
    MalformedLockId(String),
}

/// Parameters of an acquisition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquireParams {
    pub key: String,
}

/// Parameters of a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseParams {
    pub key: String,
    /// `None` when `lock-id` parsed as a negative integer, which no grant
    /// can ever carry
    pub lock_id: Option<LockId>,
}

impl AcquireParams {
    pub fn from_query(params: &QueryParams) -> Result<Self, ParamError> {
        let key = params.first(KEY_PARAM).ok_or(ParamError::Missing(KEY_PARAM))?;
        Ok(Self {
            key: key.to_owned(),
        })
    }
}

impl ReleaseParams {
    pub fn from_query(params: &QueryParams) -> Result<Self, ParamError> {
        let key = params.first(KEY_PARAM).ok_or(ParamError::Missing(KEY_PARAM))?;
        let raw = params
            .first(LOCK_ID_PARAM)
            .filter(|v| !v.is_empty())
            .ok_or(ParamError::Missing(LOCK_ID_PARAM))?;

        let value: i64 = raw
            .parse()
            .map_err(|_| ParamError::MalformedLockId(raw.to_owned()))?;

        Ok(Self {
            key: key.to_owned(),
            lock_id: u64::try_from(value).ok().map(LockId::new),
        })
    }
}
