use std::collections::HashSet;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use receipt_processor::{build_app, calculate_points, AppConfig, Receipt, ReceiptStore};

fn app() -> Router {
    build_app(ReceiptStore::new(), AppConfig::default())
}

fn target_receipt() -> Value {
    json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            { "shortDescription": "Mountain Dew 12PK", "price": "6.49" },
            { "shortDescription": "Emils Cheese Pizza", "price": "12.25" },
            { "shortDescription": "Knorr Creamy Chicken", "price": "1.26" },
            { "shortDescription": "Doritos Nacho Cheese", "price": "3.35" },
            { "shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00" }
        ],
        "total": "35.35"
    })
}

fn corner_market_receipt() -> Value {
    json!({
        "retailer": "M&M Corner Market",
        "purchaseDate": "2022-03-20",
        "purchaseTime": "14:33",
        "items": [
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" }
        ],
        "total": "9.00"
    })
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.expect("router is infallible");
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    (status, body.to_vec())
}

async fn post_raw(app: &Router, body: impl Into<Body>) -> (StatusCode, Vec<u8>) {
    let req = Request::builder()
        .method("POST")
        .uri("/receipts/process")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    send(app, req).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, req).await
}

async fn process(app: &Router, receipt: &Value) -> String {
    let (status, body) = post_raw(app, receipt.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    json["id"].as_str().expect("id is a string").to_string()
}

async fn points(app: &Router, id: &str) -> i64 {
    let (status, body) = get(app, &format!("/receipts/{id}/points")).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    json["points"].as_i64().expect("points is an integer")
}

#[tokio::test]
async fn target_receipt_round_trip() {
    let app = app();
    let id = process(&app, &target_receipt()).await;
    assert_eq!(points(&app, &id).await, 28);
}

#[tokio::test]
async fn corner_market_receipt_round_trip() {
    let app = app();
    let id = process(&app, &corner_market_receipt()).await;
    assert_eq!(points(&app, &id).await, 109);
}

#[tokio::test]
async fn fetched_points_match_direct_calculation() {
    let app = app();
    let payload = json!({
        "retailer": "Walgreens",
        "purchaseDate": "2022-01-02",
        "purchaseTime": "15:13",
        "total": "2.65",
        "items": [
            { "shortDescription": "Pepsi - 12-oz", "price": "1.25" },
            { "shortDescription": "Dasani", "price": "1.40" }
        ]
    });
    let receipt: Receipt = serde_json::from_value(payload.clone()).unwrap();

    let id = process(&app, &payload).await;
    assert_eq!(points(&app, &id).await, calculate_points(&receipt));
}

#[tokio::test]
async fn unknown_id_is_404() {
    let app = app();
    let (status, body) = get(&app, "/receipts/does-not-exist/points").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body).unwrap(), "Receipt not found");
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = app();
    let (status, body) = post_raw(&app, "{ not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body.is_empty());
}

#[tokio::test]
async fn wrong_shape_is_400() {
    let app = app();

    let mut missing_items = target_receipt();
    missing_items.as_object_mut().unwrap().remove("items");
    let (status, _) = post_raw(&app, missing_items.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut numeric_total = target_receipt();
    numeric_total["total"] = json!(35.35);
    let (status, _) = post_raw(&app, numeric_total.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_content_type_is_accepted() {
    let app = app();
    let req = Request::builder()
        .method("POST")
        .uri("/receipts/process")
        .body(Body::from(target_receipt().to_string()))
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_numbers_are_scored_as_zero() {
    let app = app();
    let payload = json!({
        "retailer": "",
        "purchaseDate": "someday",
        "purchaseTime": "later",
        "total": "a lot",
        "items": [{ "shortDescription": "abc", "price": "cheap" }]
    });

    let id = process(&app, &payload).await;
    // zero total: round dollar (50) + quarter multiple (25)
    assert_eq!(points(&app, &id).await, 75);
}

#[tokio::test]
async fn huge_prices_clamp_to_the_largest_score() {
    let app = app();
    let item = json!({ "shortDescription": "abc", "price": "9223372036854775807" });
    let payload = json!({
        "retailer": "",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "14:30",
        "total": "1.10",
        "items": [item, item, item, item, item]
    });

    let id = process(&app, &payload).await;
    assert_eq!(points(&app, &id).await, i64::MAX);
}

#[tokio::test]
async fn concurrent_creates_get_their_own_scores() {
    let app = app();

    // Retailer names of different lengths give each receipt a distinct score.
    let tasks: Vec<_> = (1..=32)
        .map(|n| {
            let app = app.clone();
            tokio::spawn(async move {
                let mut payload = target_receipt();
                payload["retailer"] = json!("x".repeat(n));
                let id = process(&app, &payload).await;
                (id, n as i64)
            })
        })
        .collect();

    let mut ids = HashSet::new();
    let mut results = Vec::new();
    for t in tasks {
        let (id, n) = t.await.unwrap();
        assert!(ids.insert(id.clone()), "duplicate id {id}");
        results.push((id, n));
    }

    for (id, n) in results {
        // Target scores 28 with a 6-char retailer name.
        assert_eq!(points(&app, &id).await, 22 + n);
    }
}

#[tokio::test]
async fn system_routes_report_health_and_counts() {
    let store = ReceiptStore::new();
    let app = build_app(store.clone(), AppConfig::default());

    let (status, body) = get(&app, "/system/alive").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");

    let (status, body) = get(&app, "/system/version").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));

    process(&app, &target_receipt()).await;
    process(&app, &corner_market_receipt()).await;

    let (_, body) = get(&app, "/system/stats").await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["receipts"], 2);
    assert_eq!(store.len(), 2);
}
