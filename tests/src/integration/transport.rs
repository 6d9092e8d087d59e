//! # Transport Behaviour
//!
//! Parameter edge cases, status codes and the admin listener, observed
//! from a real HTTP client.

#[cfg(test)]
mod tests {
    use crate::harness::{granted_id, send, TestServer};
    use lock_table::{LockTableApi, LockTableConfig};
    use reqwest::{Method, StatusCode};

    #[tokio::test]
    async fn test_replies_are_plain_text() {
        let server = TestServer::start().await;

        let response = server
            .client()
            .post(format!("{}/lock", server.base_url))
            .query(&[("key", "/a")])
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        assert!(content_type.starts_with("text/plain"), "{content_type}");
        assert_eq!(response.text().await.unwrap(), "1\n");

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_parameters_fail() {
        let server = TestServer::start().await;

        assert_eq!(server.post("/lock", &[]).await, "failure\n");
        assert_eq!(server.post("/rlock", &[("other", "x")]).await, "failure\n");
        assert_eq!(server.post("/unlock", &[("key", "/a")]).await, "failure\n");
        assert_eq!(server.post("/runlock", &[("lock-id", "1")]).await, "failure\n");
        assert_eq!(
            server.post("/unlock", &[("key", "/a"), ("lock-id", "")]).await,
            "failure\n"
        );

        // None of these reached the table.
        assert_eq!(server.table.stats().keys_tracked, 0);
        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_lock_id_is_bad_request() {
        let server = TestServer::start().await;

        let id = granted_id(&server.lock("/a").await);
        for raw in ["abc", "1.5", "1x", "99999999999999999999"] {
            let (status, body) = server
                .call(Method::POST, "/unlock", &[("key", "/a"), ("lock-id", raw)])
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "lock-id {raw:?}");
            assert_eq!(body, "", "lock-id {raw:?}");
        }

        // The grant is untouched.
        assert_eq!(server.unlock("/a", id).await, "success\n");
        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_negative_lock_id_fails() {
        let server = TestServer::start().await;

        server.lock("/a").await;
        let (status, body) = server
            .call(Method::POST, "/unlock", &[("key", "/a"), ("lock-id", "-1")])
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "failure\n");

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_first_occurrence_wins() {
        let server = TestServer::start().await;

        let id = granted_id(&server.post("/lock", &[("key", "/a"), ("key", "/b")]).await);
        assert!(server.table.inspect("/a").is_some());
        assert!(server.table.inspect("/b").is_none());

        let id = id.to_string();
        let body = server
            .post(
                "/unlock",
                &[("key", "/a"), ("lock-id", &id), ("lock-id", "junk")],
            )
            .await;
        assert_eq!(body, "success\n");

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_keys_are_opaque() {
        let server = TestServer::start().await;

        assert_eq!(server.lock("").await, "1\n");
        assert_eq!(server.lock("").await, "retry\n");
        assert_eq!(server.lock("a b&c=d/é").await, "2\n");
        assert!(server.table.inspect("a b&c=d/é").is_some());

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let server = TestServer::start().await;

        let (status, _) = server.call(Method::POST, "/steal", &[("key", "/a")]).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_health_on_lock_listener() {
        let server = TestServer::start().await;

        let (status, body) = server.call(Method::GET, "/health", &[]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok\n");

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_admin_metrics() {
        let server = TestServer::start_with(LockTableConfig::default(), true).await;
        let admin = server.admin_url.clone().unwrap();

        let id = granted_id(&server.lock("/a").await);
        server.lock("/a").await;
        server.unlock("/a", id).await;

        let client = server.client();
        let (status, body) = send(&client, Method::GET, &format!("{admin}/metrics"), &[]).await;
        assert_eq!(status, StatusCode::OK);

        let metrics: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(metrics["gateway"]["requests"]["total"], 3);
        assert_eq!(metrics["gateway"]["requests"]["granted"], 1);
        assert_eq!(metrics["gateway"]["requests"]["retry"], 1);
        assert_eq!(metrics["gateway"]["requests"]["success"], 1);
        assert_eq!(metrics["locks"]["grants_issued"], 1);
        assert_eq!(metrics["locks"]["keys_tracked"], 1);

        // Lock routes are not served on the admin listener.
        let lock_url = format!("{admin}/lock");
        let (status, _) = send(&client, Method::POST, &lock_url, &[("key", "/b")]).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_closes_listener() {
        let server = TestServer::start().await;
        let base_url = server.base_url.clone();
        server.stop().await.unwrap();

        let result = reqwest::Client::new()
            .post(format!("{base_url}/lock"))
            .query(&[("key", "/a")])
            .send()
            .await;
        assert!(result.is_err());
    }
}
