//! Health and metrics endpoint tests

use axum::http::StatusCode;
use axum::body::to_bytes;

use crate::common::{json_body, TestApp};

#[tokio::test]
async fn test_health_check_returns_version() {
    let app = TestApp::new();

    let (status, body) = json_body(app.get("/health").await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_liveness_check() {
    let app = TestApp::new();

    let (status, body) = json_body(app.get("/health/live").await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_request_counter() {
    let app = TestApp::new();
    app.get("/health").await;

    let response = app.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("brand_admin_http_requests_total"));
}
