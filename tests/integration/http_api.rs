#![allow(missing_docs)]

use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::Router;
use dboptima::server::build_router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router() -> Router {
    build_router(&[])
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    let response = router.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    let response = router.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

#[tokio::test]
async fn root_reports_service_metadata() {
    let (status, value) = get_json(router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["service"], "DBOptima AI Service");
    assert_eq!(value["vendor"], "King Group Of Technology");
    assert!(value["version"].is_string());
}

#[tokio::test]
async fn health_reports_healthy() {
    let (status, value) = get_json(router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["status"], "healthy");
    assert_eq!(value["service"], "DBOptima AI Service");
    assert!(value["timestamp"].is_string());
}

#[tokio::test]
async fn analyze_query_round_trip() {
    let (status, value) = post_json(
        router(),
        "/analyze-query",
        json!({"query": "SELECT * FROM users WHERE email = 'a@b.c'"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["original_query"], value["optimized_query"]);
    assert_eq!(value["complexity_score"], 10);
    let improvements = value["improvements"].as_array().expect("improvements");
    assert!(improvements.contains(&json!("Select specific columns instead of *")));
    let hints = value["index_recommendations"]
        .as_array()
        .expect("index recommendations");
    assert!(hints.contains(&json!("Consider index on column: email")));
    assert!(value["estimated_improvement"].as_u64().expect("improvement") >= 30);
    assert!(value["analysis_timestamp"].is_string());
}

#[tokio::test]
async fn analyze_query_accepts_schema_hint() {
    let (status, _) = post_json(
        router(),
        "/analyze-query",
        json!({
            "query": "SELECT id FROM t",
            "database_type": "mysql",
            "schema_info": {"t": {"columns": ["id"]}},
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn recommend_indexes_returns_structured_array() {
    let (status, value) = post_json(
        router(),
        "/recommend-indexes",
        json!({"query": "SELECT name FROM users WHERE email = 'x@y.z'"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let recommendations = value.as_array().expect("array body");
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["table_name"], "users");
    assert_eq!(recommendations[0]["column_names"], json!(["email"]));
    assert_eq!(recommendations[0]["index_type"], "B-tree");
    assert_eq!(recommendations[0]["priority"], "Medium");
    assert_eq!(recommendations[0]["estimated_improvement"], 30);
}

#[tokio::test]
async fn estimate_performance_flags_full_scan() {
    let (status, value) = post_json(
        router(),
        "/estimate-performance",
        json!({"query": "SELECT name FROM customers WHERE name LIKE '%smith'"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["full_table_scan_risk"], true);
    assert_eq!(value["query_complexity"], 0);
    assert_eq!(value["estimated_cost"], 0.0);
}

#[tokio::test]
async fn missing_query_field_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/analyze-query")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"database_type": "postgresql"}).to_string()))
        .expect("request");
    let response = router().oneshot(request).await.expect("response");
    assert!(response.status().is_client_error());
}
