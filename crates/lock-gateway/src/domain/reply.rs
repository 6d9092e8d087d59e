//! Line replies written back to lock clients.
//!
//! | Reply | Body | Status |
//! |-------|------|--------|
//! | `Granted` | decimal lock id | 200 |
//! | `Retry` | `retry` | 200 |
//! | `Success` | `success` | 200 |
//! | `Failure` | `failure` | 200 |
//! | `Malformed` | empty | 400 |
//!
//! `Malformed` answers 400 rather than a bare 200 with no body, so an
//! unparsable `lock-id` is distinguishable from a dropped reply.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use lock_table::{LockError, LockId};

use super::params::ParamError;

/// Outcome of one lock request as seen by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockReply {
    /// Acquisition succeeded
    Granted(LockId),
    /// Acquisition hit an incompatible holder
    Retry,
    /// Release accepted
    Success,
    /// Release rejected or required parameter missing
    Failure,
    /// `lock-id` did not parse; no body is written
    Malformed,
}

impl LockReply {
    pub fn from_acquire(result: Result<LockId, LockError>) -> Self {
        match result {
            Ok(id) => LockReply::Granted(id),
            Err(_) => LockReply::Retry,
        }
    }

    pub fn from_release(result: Result<(), LockError>) -> Self {
        match result {
            Ok(()) => LockReply::Success,
            Err(_) => LockReply::Failure,
        }
    }

    pub fn from_param_error(err: &ParamError) -> Self {
        match err {
            ParamError::Missing(_) => LockReply::Failure,
            ParamError::MalformedLockId(_) => LockReply::Malformed,
        }
    }

    /// Response body, newline terminated
    pub fn body(&self) -> String {
        match self {
            LockReply::Granted(id) => format!("{id}\n"),
            LockReply::Retry => "retry\n".to_string(),
            LockReply::Success => "success\n".to_string(),
            LockReply::Failure => "failure\n".to_string(),
            LockReply::Malformed => String::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            LockReply::Malformed => StatusCode::BAD_REQUEST,
            _ => StatusCode::OK,
        }
    }

    /// Short label for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            LockReply::Granted(_) => "granted",
            LockReply::Retry => "retry",
            LockReply::Success => "success",
            LockReply::Failure => "failure",
            LockReply::Malformed => "malformed",
        }
    }
}

impl IntoResponse for LockReply {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.body(),
        )
            .into_response()
    }
}
