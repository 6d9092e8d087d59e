//! Test harness: a lock gateway on an ephemeral loopback port.

use std::sync::Arc;

use lock_gateway::{GatewayConfig, GatewayResult, LockGatewayService, ShutdownHandle};
use lock_table::{LockTableConfig, LockTableService};
use reqwest::{Client, Method, StatusCode};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A running gateway plus a client pointed at it.
pub struct TestServer {
    pub base_url: String,
    pub admin_url: Option<String>,
    pub table: Arc<LockTableService>,
    client: Client,
    shutdown: ShutdownHandle,
    task: JoinHandle<GatewayResult<()>>,
}

impl TestServer {
    /// Lock listener only, ids starting at 1.
    pub async fn start() -> Self {
        Self::start_with(LockTableConfig::default(), false).await
    }

    pub async fn start_with(table_config: LockTableConfig, with_admin: bool) -> Self {
        let table = Arc::new(LockTableService::with_config(table_config));

        let mut config = GatewayConfig::default();
        config.admin.enabled = with_admin;
        let gateway = Arc::new(
            LockGatewayService::new(config, table.clone()).expect("default config is valid"),
        );

        let http = TcpListener::bind("127.0.0.1:0").await.expect("bind lock listener");
        let base_url = format!("http://{}", http.local_addr().expect("local addr"));

        let (admin, admin_url) = if with_admin {
            let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind admin listener");
            let url = format!("http://{}", listener.local_addr().expect("local addr"));
            (Some(listener), Some(url))
        } else {
            (None, None)
        };

        let shutdown = gateway.shutdown_handle();
        let server = Arc::clone(&gateway);
        let task = tokio::spawn(async move { server.serve(Some(http), admin).await });

        Self {
            base_url,
            admin_url,
            table,
            client: Client::new(),
            shutdown,
            task,
        }
    }

    pub fn client(&self) -> Client {
        self.client.clone()
    }

    /// Send a request and return status and body.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> (StatusCode, String) {
        send(&self.client, method, &format!("{}{}", self.base_url, path), query).await
    }

    /// POST and return the body.
    pub async fn post(&self, path: &str, query: &[(&str, &str)]) -> String {
        self.call(Method::POST, path, query).await.1
    }

    pub async fn lock(&self, key: &str) -> String {
        self.post("/lock", &[("key", key)]).await
    }

    pub async fn unlock(&self, key: &str, id: u64) -> String {
        self.post("/unlock", &[("key", key), ("lock-id", &id.to_string())]).await
    }

    pub async fn rlock(&self, key: &str) -> String {
        self.post("/rlock", &[("key", key)]).await
    }

    pub async fn runlock(&self, key: &str, id: u64) -> String {
        self.post("/runlock", &[("key", key), ("lock-id", &id.to_string())]).await
    }

    /// Trigger shutdown and wait for the servers to drain.
    pub async fn stop(self) -> GatewayResult<()> {
        self.shutdown.trigger();
        self.task.await.expect("server task panicked")
    }
}

/// Send one request with an arbitrary client.
pub async fn send(
    client: &Client,
    method: Method,
    url: &str,
    query: &[(&str, &str)],
) -> (StatusCode, String) {
    let response = client
        .request(method, url)
        .query(query)
        .send()
        .await
        .expect("request failed");
    let status = response.status();
    let body = response.text().await.expect("read body");
    (status, body)
}

/// Parse a granted identifier reply such as `"7\n"`.
pub fn granted_id(body: &str) -> u64 {
    body.strip_suffix('\n')
        .and_then(|id| id.parse().ok())
        .unwrap_or_else(|| panic!("expected an identifier line, got {body:?}"))
}
