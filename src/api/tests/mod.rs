use super::*;
use crate::error::ApiError;
use crate::export::UTF8_BOM;
use crate::presenter::NewsDigest;
use crate::test_helpers::{StubBackend, config_for, mount_feed, rss_feed};
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use std::time::Duration;
use tower::ServiceExt; // for oneshot()
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Router backed by a mock feed on `server` and a stub translator
fn router_for(server: &MockServer, backend: Arc<StubBackend>) -> Router {
    let config = Arc::new(config_for(server));
    let pipeline = Arc::new(NewsPipeline::with_backend(&config, backend).unwrap());
    create_router(pipeline, config)
}

async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body.to_vec())
}

async fn failing_feed_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn dashboard_renders_items() {
    let server = MockServer::start().await;
    mount_feed(&server, rss_feed(3)).await;
    let app = router_for(&server, Arc::new(StubBackend::default()));

    let (status, headers, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );

    let html = String::from_utf8(body).unwrap();
    assert_eq!(html.matches("<details").count(), 3);
    assert!(html.contains("#1. KO(Story 1)"));
    assert!(html.contains("#3. KO(Story 3)"));
    assert!(html.contains("download=\"techcrunch_translated_news.csv\""));
    assert!(html.contains("data:text/csv;charset=utf-8;base64,"));
}

#[tokio::test]
async fn dashboard_shows_translation_warning() {
    let server = MockServer::start().await;
    mount_feed(&server, rss_feed(2)).await;
    let app = router_for(&server, Arc::new(StubBackend::failing_on("Story 1")));

    let (status, _, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);

    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("번역 오류: translation request failed: quota exceeded"));
    assert!(html.contains("#1. 번역 실패: Story 1..."));
    assert!(html.contains("#2. KO(Story 2)"));
}

#[tokio::test]
async fn dashboard_feed_failure_shows_single_error() {
    let server = failing_feed_server().await;
    let app = router_for(&server, Arc::new(StubBackend::default()));

    let (status, _, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let html = String::from_utf8(body).unwrap();
    assert_eq!(html.matches("오류가 발생했습니다").count(), 1);
    assert!(!html.contains("<details"));
    assert!(!html.contains("download="));
}

#[tokio::test]
async fn export_csv_is_attachment_with_bom() {
    let server = MockServer::start().await;
    mount_feed(&server, rss_feed(3)).await;
    let app = router_for(&server, Arc::new(StubBackend::default()));

    let (status, headers, body) = get(app, "/export.csv").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv; charset=utf-8");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"techcrunch_translated_news.csv\""
    );
    assert!(body.starts_with(UTF8_BOM));

    let mut reader = csv::Reader::from_reader(&body[UTF8_BOM.len()..]);
    assert_eq!(reader.headers().unwrap().len(), 6);
    let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.len() == 6));
}

#[tokio::test]
async fn export_csv_feed_failure_is_json_error() {
    let server = failing_feed_server().await;
    let app = router_for(&server, Arc::new(StubBackend::default()));

    let (status, _, body) = get(app, "/export.csv").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let api_error: ApiError = serde_json::from_slice(&body).unwrap();
    assert_eq!(api_error.error.code, "feed_error");
}

#[tokio::test]
async fn news_endpoint_returns_digest() {
    let server = MockServer::start().await;
    mount_feed(&server, rss_feed(2)).await;
    let app = router_for(&server, Arc::new(StubBackend::default()));

    let (status, _, body) = get(app, "/api/v1/news").await;
    assert_eq!(status, StatusCode::OK);

    let digest: NewsDigest = serde_json::from_slice(&body).unwrap();
    assert_eq!(digest.items.len(), 2);
    assert_eq!(digest.items[1].translated_title, "KO(Story 2)");
    assert!(digest.source_url.ends_with("/feed/"));
}

#[tokio::test]
async fn health_endpoint() {
    let server = MockServer::start().await;
    let app = router_for(&server, Arc::new(StubBackend::default()));

    let (status, _, body) = get(app, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["feed"], format!("{}/feed/", server.uri()));
    assert_eq!(json["languages"]["source"], "en");
    assert_eq!(json["languages"]["target"], "ko");

    // Health never runs the pipeline
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn openapi_endpoint() {
    let server = MockServer::start().await;
    let app = router_for(&server, Arc::new(StubBackend::default()));

    let (status, _, body) = get(app, "/api/v1/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["paths"].get("/api/v1/news").is_some());
}

#[tokio::test]
async fn cors_headers_when_enabled() {
    let server = MockServer::start().await;
    let app = router_for(&server, Arc::new(StubBackend::default()));

    let request = Request::builder()
        .uri("/api/v1/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn no_cors_headers_when_disabled() {
    let server = MockServer::start().await;
    let mut config = config_for(&server);
    config.server.api.cors_enabled = false;
    let config = Arc::new(config);
    let pipeline =
        Arc::new(NewsPipeline::with_backend(&config, Arc::new(StubBackend::default())).unwrap());
    let app = create_router(pipeline, config);

    let request = Request::builder()
        .uri("/api/v1/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[tokio::test]
async fn unknown_route_is_404() {
    let server = MockServer::start().await;
    let app = router_for(&server, Arc::new(StubBackend::default()));

    let (status, _, _) = get(app, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn server_starts_and_shuts_down() {
    let server = MockServer::start().await;
    let mut config = config_for(&server);
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap(); // Port 0 = OS assigns a free port
    let config = Arc::new(config);
    let pipeline =
        Arc::new(NewsPipeline::with_backend(&config, Arc::new(StubBackend::default())).unwrap());

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let handle = tokio::spawn(start_api_server(pipeline, config, async {
        rx.await.ok();
    }));

    tokio::time::sleep(Duration::from_millis(100)).await;
    tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop after shutdown signal")
        .unwrap();
    assert!(result.is_ok());
}
