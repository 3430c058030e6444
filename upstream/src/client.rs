use std::time::Duration;

use common::error::{AppError, Res};
use log::{info, warn};
use reqwest::{Client, Method};
use serde_json::Value;

/// Client for the upstream global-chat admin API.
///
/// Forwards bearer-authenticated administrative calls verbatim and
/// classifies failures so callers can tell a definite rejection apart from
/// an ambiguous one (timeout, severed connection) where the upstream may
/// have completed the work anyway.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    /// Builds a client bound to `base_url` with a per-request budget of
    /// `timeout`. A call that outlives the budget is aborted and surfaces
    /// as `AppError::Timeout`.
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build upstream HTTP client");
        UpstreamClient { client, base_url }
    }

    /// Forwards one request to the upstream admin API.
    ///
    /// Fails with `Unauthenticated` before any network activity when no
    /// `Authorization` value is supplied. Otherwise the header is attached
    /// verbatim and the upstream JSON body is returned unchanged on
    /// success. Non-success statuses become `Upstream` errors carrying the
    /// upstream-supplied `error` message when present.
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        auth: Option<&str>,
        body: Option<&Value>,
    ) -> Res<Value> {
        let Some(auth) = auth else {
            return Err(AppError::Unauthenticated);
        };

        info!("Forwarding {} {} to upstream", method, path);

        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header("Authorization", auth)
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.json::<Value>().await.unwrap_or(Value::Null);
            let message = error_body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| {
                    format!(
                        "API Error: {}",
                        status.canonical_reason().unwrap_or("unknown status")
                    )
                });
            warn!("Upstream rejected {}: {}", path, message);
            return Err(AppError::Upstream(message));
        }

        Ok(response.json::<Value>().await?)
    }

    pub async fn get(&self, path: &str, auth: Option<&str>) -> Res<Value> {
        self.forward(Method::GET, path, auth, None).await
    }

    pub async fn post(&self, path: &str, auth: Option<&str>, body: &Value) -> Res<Value> {
        self.forward(Method::POST, path, auth, Some(body)).await
    }

    pub async fn patch(&self, path: &str, auth: Option<&str>, body: &Value) -> Res<Value> {
        self.forward(Method::PATCH, path, auth, Some(body)).await
    }

    pub async fn delete(&self, path: &str, auth: Option<&str>) -> Res<Value> {
        self.forward(Method::DELETE, path, auth, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        )
    }

    /// Minimal canned upstream: answers every connection with `response`
    /// and counts how many connections it accepted.
    async fn spawn_upstream(response: String) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        tokio::spawn(async move {
            loop {
                let (mut socket, _) = listener.accept().await.unwrap();
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        (format!("http://{}", addr), hits)
    }

    #[tokio::test]
    async fn missing_auth_fails_before_contacting_upstream() {
        let (url, hits) = spawn_upstream(http_response("200 OK", "{}")).await;
        let client = UpstreamClient::new(url, Duration::from_secs(5));

        let err = client.get("/admin/api-keys", None).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn success_body_passes_through_unchanged() {
        let body = r#"{"data":{"apiKeys":[{"id":"k1","name":"Bot Prod"}]}}"#;
        let (url, _) = spawn_upstream(http_response("200 OK", body)).await;
        let client = UpstreamClient::new(url, Duration::from_secs(5));

        let value = client
            .get("/admin/api-keys", Some("Bearer secret"))
            .await
            .unwrap();
        assert_eq!(value, serde_json::from_str::<Value>(body).unwrap());
    }

    #[tokio::test]
    async fn upstream_error_message_is_carried() {
        let (url, _) =
            spawn_upstream(http_response("403 Forbidden", r#"{"error":"insufficient permissions"}"#))
                .await;
        let client = UpstreamClient::new(url, Duration::from_secs(5));

        let err = client
            .post("/unban/user", Some("Bearer secret"), &json!({"userId": "1"}))
            .await
            .unwrap_err();
        match err {
            AppError::Upstream(message) => assert_eq!(message, "insufficient permissions"),
            other => panic!("expected Upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn upstream_error_without_body_falls_back_to_status_text() {
        let (url, _) = spawn_upstream(http_response("404 Not Found", "")).await;
        let client = UpstreamClient::new(url, Duration::from_secs(5));

        let err = client
            .get("/message/info/123", Some("Bearer secret"))
            .await
            .unwrap_err();
        match err {
            AppError::Upstream(message) => assert_eq!(message, "API Error: Not Found"),
            other => panic!("expected Upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unresponsive_upstream_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and hold the socket without ever answering.
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(60)).await;
        });

        let client = UpstreamClient::new(format!("http://{}", addr), Duration::from_millis(200));
        let err = client
            .delete("/message/42", Some("Bearer secret"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Timeout));
    }

    #[tokio::test]
    async fn severed_connection_is_classified_as_connection_closed() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            // Drop without writing a response.
            drop(socket);
        });

        let client = UpstreamClient::new(format!("http://{}", addr), Duration::from_secs(5));
        let err = client
            .delete("/message/42", Some("Bearer secret"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ConnectionClosed));
    }
}
