//! # Server Configuration
//!
//! Unified configuration for the lock table and its gateway, loaded from
//! the environment. Unset variables keep their defaults; unparsable ones
//! are logged and ignored.

use lock_gateway::GatewayConfig;
use lock_table::LockTableConfig;
use std::env;
use std::str::FromStr;
use tracing::{info, warn};

/// Complete server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Listener configuration.
    pub gateway: GatewayConfig,
    /// Lock table configuration.
    pub table: LockTableConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `LOCKD_HTTP_HOST`, `LOCKD_HTTP_PORT`: lock listener (default `0.0.0.0:8090`)
    /// - `LOCKD_ADMIN_ENABLED`: serve `/health` and `/metrics` on a second listener
    /// - `LOCKD_ADMIN_HOST`, `LOCKD_ADMIN_PORT`: admin listener (default `127.0.0.1:8091`)
    /// - `LOCKD_FIRST_LOCK_ID`: first identifier handed out (default `1`)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        override_with(&lookup, "LOCKD_HTTP_HOST", &mut config.gateway.http.host);
        override_with(&lookup, "LOCKD_HTTP_PORT", &mut config.gateway.http.port);
        override_with(&lookup, "LOCKD_ADMIN_ENABLED", &mut config.gateway.admin.enabled);
        override_with(&lookup, "LOCKD_ADMIN_HOST", &mut config.gateway.admin.host);
        override_with(&lookup, "LOCKD_ADMIN_PORT", &mut config.gateway.admin.port);
        override_with(&lookup, "LOCKD_FIRST_LOCK_ID", &mut config.table.first_lock_id);

        config
    }
}

fn override_with<F, T>(lookup: &F, name: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(name) else {
        return;
    };

    match raw.trim().parse() {
        Ok(value) => {
            *target = value;
            info!(variable = name, value = %raw, "Loaded setting from environment");
        }
        Err(_) => warn!(variable = name, value = %raw, "Ignoring unparsable setting"),
    }
}
