//! Lock gateway service - binds the listeners and serves until shutdown.
//!
//! Provides the lock HTTP server and an optional admin server.

use crate::domain::config::GatewayConfig;
use crate::domain::error::{GatewayError, GatewayResult};
use crate::middleware::{GatewayMetrics, TracingLayer};
use crate::router::{lock_routes, AppState};
use axum::{extract::State, routing::get, Json, Router};
use lock_table::LockTableApi;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{error, info};

/// Lock gateway service state
pub struct LockGatewayService {
    config: GatewayConfig,
    locks: Arc<dyn LockTableApi>,
    metrics: Arc<GatewayMetrics>,
    shutdown_tx: Arc<watch::Sender<bool>>,
}

impl LockGatewayService {
    /// Create a new gateway over `locks`
    pub fn new(config: GatewayConfig, locks: Arc<dyn LockTableApi>) -> GatewayResult<Self> {
        config.validate()?;

        let (shutdown_tx, _) = watch::channel(false);

        Ok(Self {
            config,
            locks,
            metrics: Arc::new(GatewayMetrics::new()),
            shutdown_tx: Arc::new(shutdown_tx),
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Handle that stops every server started by this service
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: Arc::clone(&self.shutdown_tx),
        }
    }

    /// Trigger graceful shutdown
    pub fn shutdown(&self) {
        self.shutdown_handle().trigger();
    }

    /// Bind the configured listeners and serve until shutdown
    pub async fn start(&self) -> GatewayResult<()> {
        info!("Starting lock gateway...");

        let http = if self.config.http.enabled {
            Some(bind("http", self.config.http_addr()).await?)
        } else {
            None
        };

        let admin = if self.config.admin.enabled {
            Some(bind("admin", self.config.admin_addr()).await?)
        } else {
            None
        };

        self.serve(http, admin).await
    }

    /// Serve on already-bound listeners until shutdown or a server fails
    pub async fn serve(
        &self,
        http: Option<TcpListener>,
        admin: Option<TcpListener>,
    ) -> GatewayResult<()> {
        let mut servers = JoinSet::new();

        if let Some(listener) = http {
            self.spawn_server(&mut servers, "http", listener, self.build_http_router());
        }
        if let Some(listener) = admin {
            self.spawn_server(&mut servers, "admin", listener, self.build_admin_router());
        }

        info!("Lock gateway started");

        let mut outcome = Ok(());
        while let Some(joined) = servers.join_next().await {
            let result = joined
                .map_err(|e| GatewayError::Task(e.to_string()))
                .and_then(|served| served);

            if let Err(err) = result {
                error!(error = %err, "Server stopped with error");
                self.shutdown();
                if outcome.is_ok() {
                    outcome = Err(err);
                }
            }
        }

        info!("Lock gateway stopped");
        outcome
    }

    fn spawn_server(
        &self,
        servers: &mut JoinSet<GatewayResult<()>>,
        listener_name: &'static str,
        listener: TcpListener,
        router: Router,
    ) {
        if let Ok(addr) = listener.local_addr() {
            info!(listener = listener_name, addr = %addr, "Serving");
        }

        let shutdown_rx = self.shutdown_tx.subscribe();
        servers.spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(wait_for_shutdown(shutdown_rx))
                .await
                .map_err(|source| GatewayError::Serve {
                    listener: listener_name,
                    source,
                })
        });
    }

    /// Build HTTP router for the lock endpoints
    pub fn build_http_router(&self) -> Router {
        let state = AppState::new(Arc::clone(&self.locks), Arc::clone(&self.metrics));

        lock_routes()
            .route("/health", get(health_check))
            .layer(TracingLayer::new())
            .with_state(state)
    }

    /// Build Admin router
    pub fn build_admin_router(&self) -> Router {
        let state = AppState::new(Arc::clone(&self.locks), Arc::clone(&self.metrics));

        Router::new()
            .route("/health", get(health_check))
            .route("/metrics", get(metrics_snapshot))
            .with_state(state)
    }
}

/// Cloneable trigger for graceful shutdown
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

async fn bind(listener: &'static str, addr: SocketAddr) -> GatewayResult<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| GatewayError::Bind {
            listener,
            addr,
            source,
        })
}

async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    while !*rx.borrow_and_update() {
        if rx.changed().await.is_err() {
            return;
        }
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok\n"
}

/// Gateway counters plus lock table stats
async fn metrics_snapshot(State(state): State<AppState>) -> Json<serde_json::Value> {
    let stats = state.locks.stats();
    Json(serde_json::json!({
        "gateway": state.metrics.to_json(),
        "locks": stats,
    }))
}
