//! Lock endpoint handlers.
//!
//! | Route | Operation | Parameters |
//! |-------|-----------|------------|
//! | `/lock` | acquire exclusive | `key` |
//! | `/unlock` | release exclusive | `key`, `lock-id` |
//! | `/rlock` | acquire shared | `key` |
//! | `/runlock` | release shared | `key`, `lock-id` |
//!
//! Every route answers both GET and POST.

use crate::domain::params::{AcquireParams, QueryParams, ReleaseParams};
use crate::domain::reply::LockReply;
use crate::middleware::{GatewayMetrics, RequestTimer};
use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use lock_table::{LockKind, LockTableApi};
use std::sync::Arc;
use tracing::{debug, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub locks: Arc<dyn LockTableApi>,
    pub metrics: Arc<GatewayMetrics>,
}

impl AppState {
    pub fn new(locks: Arc<dyn LockTableApi>, metrics: Arc<GatewayMetrics>) -> Self {
        Self { locks, metrics }
    }
}

/// Router with the four lock endpoints
pub fn lock_routes() -> Router<AppState> {
    Router::new()
        .route("/lock", get(lock).post(lock))
        .route("/unlock", get(unlock).post(unlock))
        .route("/rlock", get(rlock).post(rlock))
        .route("/runlock", get(runlock).post(runlock))
}

async fn lock(State(state): State<AppState>, Query(params): Query<QueryParams>) -> LockReply {
    handle_acquire(&state, LockKind::Exclusive, &params)
}

async fn unlock(State(state): State<AppState>, Query(params): Query<QueryParams>) -> LockReply {
    handle_release(&state, LockKind::Exclusive, &params)
}

async fn rlock(State(state): State<AppState>, Query(params): Query<QueryParams>) -> LockReply {
    handle_acquire(&state, LockKind::Shared, &params)
}

async fn runlock(State(state): State<AppState>, Query(params): Query<QueryParams>) -> LockReply {
    handle_release(&state, LockKind::Shared, &params)
}

/// Parse, acquire, and record the reply.
pub fn handle_acquire(state: &AppState, kind: LockKind, params: &QueryParams) -> LockReply {
    let timer = RequestTimer::start();

    let reply = match AcquireParams::from_query(params) {
        Ok(request) => LockReply::from_acquire(state.locks.acquire(kind, &request.key)),
        Err(err) => {
            debug!(mode = %kind, error = %err, "Acquire request missing parameters");
            LockReply::from_param_error(&err)
        }
    };

    state.metrics.record_reply(&reply, timer.elapsed_us());
    reply
}

/// Parse, release, and record the reply.
pub fn handle_release(state: &AppState, kind: LockKind, params: &QueryParams) -> LockReply {
    let timer = RequestTimer::start();

    let reply = match ReleaseParams::from_query(params) {
        Ok(ReleaseParams {
            key,
            lock_id: Some(id),
        }) => LockReply::from_release(state.locks.release(kind, &key, id)),
        Ok(ReleaseParams { key, lock_id: None }) => {
            debug!(key = %key, mode = %kind, "Release with negative lock-id");
            LockReply::Failure
        }
        Err(err) => {
            let reply = LockReply::from_param_error(&err);
            if reply == LockReply::Malformed {
                warn!(mode = %kind, error = %err, "Malformed release request");
            } else {
                debug!(mode = %kind, error = %err, "Release request missing parameters");
            }
            reply
        }
    };

    state.metrics.record_reply(&reply, timer.elapsed_us());
    reply
}
