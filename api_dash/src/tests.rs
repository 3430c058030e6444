use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use upstream::UpstreamClient;

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )
}

/// Reads one HTTP request, headers plus any Content-Length body, off the
/// socket. Request bodies can arrive in a separate packet from the head.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = socket.read(&mut buf).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        let text = String::from_utf8_lossy(&data);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let content_length = text
                .lines()
                .find_map(|line| line.to_ascii_lowercase().strip_prefix("content-length:").map(str::trim).map(str::to_owned))
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).to_string()
}

struct FakeUpstream {
    base_url: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
}

/// Canned upstream that answers every connection with `response` and
/// records the raw request head it received.
async fn spawn_upstream(response: String) -> FakeUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));
    let counter = Arc::clone(&hits);
    let log = Arc::clone(&requests);
    tokio::spawn(async move {
        loop {
            let (mut socket, _) = listener.accept().await.unwrap();
            counter.fetch_add(1, Ordering::SeqCst);
            let request = read_request(&mut socket).await;
            log.lock().unwrap().push(request);
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });
    FakeUpstream {
        base_url: format!("http://{}", addr),
        hits,
        requests,
    }
}

/// Upstream that accepts, reads the request, then drops the socket without
/// answering. Every call through it fails as `ConnectionClosed`.
async fn spawn_dropping_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 8192];
            let _ = socket.read(&mut buf).await;
            drop(socket);
        }
    });
    format!("http://{}", addr)
}

macro_rules! dash_app {
    ($base_url:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(UpstreamClient::new(
                    $base_url,
                    Duration::from_secs(5),
                )))
                .service(
                    web::scope("/api").service(
                        web::scope("/dash")
                            .wrap(crate::middleware())
                            .service(crate::mount_dash()),
                    ),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn missing_authorization_is_rejected_before_upstream() {
    let fake = spawn_upstream(http_response("200 OK", "{}")).await;
    let app = dash_app!(fake.base_url.clone());

    let req = test::TestRequest::get().uri("/api/dash/api-keys").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Missing Authorization header");
    assert_eq!(fake.hits.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn list_keys_passes_upstream_body_through() {
    let upstream_body = r#"{"data":{"apiKeys":[{"id":"k1","name":"Bot Prod","permissions":["ban_user"],"isActive":true}]}}"#;
    let fake = spawn_upstream(http_response("200 OK", upstream_body)).await;
    let app = dash_app!(fake.base_url.clone());

    let req = test::TestRequest::get()
        .uri("/api/dash/api-keys")
        .insert_header(("Authorization", "Bearer secret"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, serde_json::from_str::<Value>(upstream_body).unwrap());

    let recorded = fake.requests.lock().unwrap();
    assert!(recorded[0].starts_with("GET /admin/api-keys "));
    assert!(recorded[0].contains("authorization: Bearer secret"));
}

#[actix_web::test]
async fn create_key_returns_201_with_upstream_payload() {
    let upstream_body = r#"{"status":"success","message":"created","data":{"apiKey":"gc_live_abc","keyId":"k2","name":"Bot Prod","permissions":["ban_user"],"warning":"Store this key now"}}"#;
    let fake = spawn_upstream(http_response("200 OK", upstream_body)).await;
    let app = dash_app!(fake.base_url.clone());

    let req = test::TestRequest::post()
        .uri("/api/dash/api-keys")
        .insert_header(("Authorization", "Bearer secret"))
        .set_json(json!({"name": "Bot Prod", "permissions": ["ban_user"]}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["apiKey"], "gc_live_abc");

    let recorded = fake.requests.lock().unwrap();
    assert!(recorded[0].starts_with("POST /admin/api-keys "));
    assert!(recorded[0].contains(r#""name":"Bot Prod""#));
}

#[actix_web::test]
async fn metrics_query_defaults_are_forwarded() {
    let fake = spawn_upstream(http_response("200 OK", r#"{"data":{}}"#)).await;
    let app = dash_app!(fake.base_url.clone());

    let req = test::TestRequest::get()
        .uri("/api/dash/metrics")
        .insert_header(("Authorization", "Bearer secret"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/dash/api-keys/k1/metrics?page=3")
        .insert_header(("Authorization", "Bearer secret"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let recorded = fake.requests.lock().unwrap();
    assert!(recorded[0].starts_with("GET /admin/metrics?hoursBack=24 "));
    assert!(recorded[1].starts_with("GET /admin/api-keys/k1/metrics?page=3&limit=50&hoursBack=24 "));
}

#[actix_web::test]
async fn upstream_rejection_maps_to_500_with_message() {
    let fake =
        spawn_upstream(http_response("403 Forbidden", r#"{"error":"invalid API key"}"#)).await;
    let app = dash_app!(fake.base_url.clone());

    let req = test::TestRequest::get()
        .uri("/api/dash/bans")
        .insert_header(("Authorization", "Bearer wrong"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "invalid API key");
}

#[actix_web::test]
async fn message_delete_over_severed_connection_returns_202_warning() {
    let base_url = spawn_dropping_upstream().await;
    let app = dash_app!(base_url);

    let req = test::TestRequest::delete()
        .uri("/api/dash/messages/123456789")
        .insert_header(("Authorization", "Bearer secret"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::ACCEPTED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "warning");
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert!(!body["suggestion"].as_str().unwrap().is_empty());
}

#[actix_web::test]
async fn non_deletion_writes_over_severed_connection_return_500() {
    let base_url = spawn_dropping_upstream().await;
    let app = dash_app!(base_url);

    let req = test::TestRequest::post()
        .uri("/api/dash/unban/user")
        .insert_header(("Authorization", "Bearer secret"))
        .set_json(json!({"userId": "42"}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("Connection closed"));
}

#[actix_web::test]
async fn message_info_resolves_by_any_server_message_id() {
    let upstream_body = r#"{"data":{"originalMessageId":"111","content":"hi","author":"a#1","serverMessages":[{"guildId":"g1","messageId":"111"},{"guildId":"g2","messageId":"222"}],"totalServers":2}}"#;
    let fake = spawn_upstream(http_response("200 OK", upstream_body)).await;
    let app = dash_app!(fake.base_url.clone());

    let req = test::TestRequest::get()
        .uri("/api/dash/messages/222")
        .insert_header(("Authorization", "Bearer secret"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let recorded = fake.requests.lock().unwrap();
    assert!(recorded[0].starts_with("GET /message/info/222 "));
}
