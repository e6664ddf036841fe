//! Brand performance snapshot API tests

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{json_body, TestApp};

const SNAPSHOTS: &str = "/admin/metrics/brand-performance/snapshots";

fn app_with_brands() -> TestApp {
    let app = TestApp::new();
    for id in 1..=3 {
        app.store.add_brand(id, true);
    }
    app.store.add_brand(4, false);
    app
}

fn value_of(body: &Value, aspect: &str) -> f64 {
    body["values"]
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["aspect"] == aspect)
        .and_then(|v| v["value"].as_f64())
        .unwrap()
}

#[tokio::test]
async fn test_snapshot_of_all_brands_pages_through_them() {
    let app = app_with_brands();

    let (status, body) = json_body(app.request(Method::POST, SNAPSHOTS, Some(json!({})), true, None).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exit_code"], 0);
    assert_eq!(body["brands_processed"], 3);
    assert_eq!(body["values_written"], 36);
    assert_eq!(
        body["lines"],
        json!([
            "No filtering by ID",
            "Brand: [#3] ...",
            "- metrics saved",
            "Brand: [#2] ...",
            "- metrics saved",
            "Brand: [#1] ...",
            "- metrics saved"
        ])
    );
}

#[tokio::test]
async fn test_snapshot_filtered_by_ids() {
    let app = app_with_brands();

    let body = json!({"ids": "1, x, 4"});
    let (status, body) = json_body(app.request(Method::POST, SNAPSHOTS, Some(body), true, None).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["brands_processed"], 1);
    assert_eq!(body["lines"][0], "Only IDs: [ 1, 4 ]");
    assert_eq!(body["lines"][1], "Brand: [#1] ...");
    assert_eq!(app.store.snapshots.lock().len(), 1);
}

#[tokio::test]
async fn test_latest_snapshot_after_run() {
    let app = app_with_brands();
    let latest = "/admin/brands/2/metrics/brand-performance/latest";

    let response = app.request(Method::GET, latest, None, true, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    app.request(Method::POST, SNAPSHOTS, Some(json!({"ids": [2]})), true, None)
        .await;

    let (status, body) = json_body(app.request(Method::GET, latest, None, true, None).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["brand_id"], 2);
    assert_eq!(body["values"].as_array().unwrap().len(), 12);
    assert_eq!(value_of(&body, "CONTENT_WITH_GMV"), 3.0);
    assert_eq!(value_of(&body, "GMV"), 300.0);
    assert_eq!(value_of(&body, "AVG_ORDER_PRICE"), 150.0);
    assert_eq!(value_of(&body, "CONTENT_GMV_TIER_HIGH"), 1.0);
    assert_eq!(value_of(&body, "CONTENT_ENGAGEMENT_RATE"), 0.2);
    assert_eq!(value_of(&body, "CREATORS_APPROVED"), 3.0);
    assert_eq!(value_of(&body, "PRODUCTS_SHIPPED_VIA_TIK_TOK"), 3.0);
}

#[tokio::test]
async fn test_latest_snapshot_of_unknown_brand() {
    let app = app_with_brands();

    let response = app
        .request(Method::GET, "/admin/brands/99/metrics/brand-performance/latest", None, true, None)
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
