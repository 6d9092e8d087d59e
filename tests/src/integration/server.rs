//! # Server Runtime
//!
//! Starts the full `LockServer` from environment-style configuration and
//! drives it over its own listeners until shutdown.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::harness::{granted_id, send};
    use lock_server::{LockServer, ServerConfig};
    use lock_table::LockTableApi;
    use reqwest::{Client, Method, StatusCode};

    /// Reserve a loopback port by binding and immediately releasing it.
    fn free_port() -> u16 {
        std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .map(|addr| addr.port())
            .expect("reserve port")
    }

    async fn wait_until_healthy(client: &Client, base_url: &str) {
        for _ in 0..100 {
            if let Ok(response) = client.get(format!("{base_url}/health")).send().await {
                if response.status() == StatusCode::OK {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("server at {base_url} never became healthy");
    }

    #[tokio::test]
    async fn test_server_serves_until_shutdown() {
        let http_port = free_port().to_string();
        let admin_port = free_port().to_string();
        let config = ServerConfig::from_lookup(|name| {
            match name {
                "LOCKD_HTTP_HOST" => Some("127.0.0.1"),
                "LOCKD_HTTP_PORT" => Some(http_port.as_str()),
                "LOCKD_ADMIN_ENABLED" => Some("true"),
                "LOCKD_ADMIN_PORT" => Some(admin_port.as_str()),
                "LOCKD_FIRST_LOCK_ID" => Some("500"),
                _ => None,
            }
            .map(str::to_owned)
        });

        let server = LockServer::new(config).unwrap();
        let table = server.table();
        let shutdown = server.shutdown_handle();
        let running = tokio::spawn(async move { server.run().await });

        let client = Client::new();
        let base_url = format!("http://127.0.0.1:{http_port}");
        let admin_url = format!("http://127.0.0.1:{admin_port}");
        wait_until_healthy(&client, &base_url).await;

        let lock_url = format!("{base_url}/lock");
        let (_, body) = send(&client, Method::POST, &lock_url, &[("key", "/a")]).await;
        assert_eq!(granted_id(&body), 500);
        let (_, body) = send(&client, Method::POST, &lock_url, &[("key", "/a")]).await;
        assert_eq!(body, "retry\n");

        // The runtime and the caller see the same table.
        assert_eq!(table.inspect("/a").unwrap().holders.len(), 1);

        let metrics_url = format!("{admin_url}/metrics");
        let (status, body) = send(&client, Method::GET, &metrics_url, &[]).await;
        assert_eq!(status, StatusCode::OK);
        let metrics: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(metrics["locks"]["grants_issued"], 1);

        shutdown.trigger();
        let outcome = tokio::time::timeout(Duration::from_secs(5), running)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn test_server_reports_bind_failure() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port().to_string();
        let config = ServerConfig::from_lookup(|name| match name {
            "LOCKD_HTTP_HOST" => Some("127.0.0.1".to_owned()),
            "LOCKD_HTTP_PORT" => Some(port.clone()),
            _ => None,
        });

        let server = LockServer::new(config).unwrap();
        assert!(server.run().await.is_err());
    }
}
