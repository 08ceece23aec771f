//! Integration tests for the HTTP service front.
//!
//! Drives the real router with `oneshot` requests; the engine is populated directly
//! instead of going through the upstream loader.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use message_search::metrics::RequestMetrics;
use message_search::search::engine::SearchEngine;
use message_search::search::types::{Message, SearchResponse};
use message_search::server::build_router;
use serde_json::Value;
use tower::ServiceExt;

fn message(id: &str, user_name: &str, text: &str) -> Message {
    Message {
        id: id.to_string(),
        user_id: format!("user-{}", id),
        user_name: user_name.to_string(),
        timestamp: "2024-11-07T09:30:00Z".to_string(),
        message: text.to_string(),
    }
}

fn corpus() -> Vec<Message> {
    vec![
        message("1", "Sophia Al-Farsi", "Book a hotel in Paris"),
        message("2", "Fatima El-Tahir", "Confirm flight to Paris"),
        message("3", "Armand Dupont", "Need dinner reservation"),
    ]
}

fn setup_app(messages: Option<Vec<Message>>) -> (Router, Arc<SearchEngine>) {
    let engine = Arc::new(SearchEngine::new());
    if let Some(messages) = messages {
        engine.populate(messages);
    }
    let app = build_router(engine.clone(), Arc::new(RequestMetrics::new()));
    (app, engine)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_returns_matching_page() {
    let (app, _) = setup_app(Some(corpus()));

    let (status, body) = get(&app, "/search?q=paris&page=1&limit=10").await;

    assert_eq!(status, StatusCode::OK);
    let response: SearchResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.total, 2);
    assert_eq!(response.total_pages, 1);
    let ids: Vec<&str> = response.items.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[tokio::test]
async fn test_search_defaults_match_everything() {
    let (app, _) = setup_app(Some(corpus()));

    let (status, body) = get(&app, "/search").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
    assert!(body["query_time_ms"].is_number());
}

#[tokio::test]
async fn test_search_pagination_metadata() {
    let (app, _) = setup_app(Some(corpus()));

    let (_, first) = get(&app, "/search?q=&page=1&limit=2").await;
    let (_, second) = get(&app, "/search?q=&page=2&limit=2").await;
    let (_, beyond) = get(&app, "/search?q=&page=9&limit=2").await;

    assert_eq!(first["total_pages"], 2);
    assert_eq!(first["items"].as_array().unwrap().len(), 2);
    assert_eq!(second["items"][0]["id"], "3");
    assert_eq!(beyond["items"].as_array().unwrap().len(), 0);
    assert_eq!(beyond["total"], 3);
}

#[tokio::test]
async fn test_search_no_match_is_empty_success() {
    let (app, _) = setup_app(Some(corpus()));

    let (status, body) = get(&app, "/search?q=xyz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["total_pages"], 0);
}

#[tokio::test]
async fn test_search_validates_bounds() {
    let (app, _) = setup_app(Some(corpus()));

    let (page_status, page_body) = get(&app, "/search?q=paris&page=0").await;
    let (limit_status, _) = get(&app, "/search?q=paris&limit=101").await;
    let (zero_status, _) = get(&app, "/search?q=paris&limit=0").await;

    assert_eq!(page_status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(page_body["error"].as_str().unwrap().contains("page"));
    assert_eq!(limit_status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(zero_status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_search_rejects_non_numeric_page() {
    let (app, _) = setup_app(Some(corpus()));

    let request = Request::builder()
        .uri("/search?q=paris&page=abc")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_before_ready_is_unavailable() {
    let (app, engine) = setup_app(None);

    let (status, body) = get(&app, "/search?q=paris").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Service is loading, please retry");

    engine.populate(corpus());
    let (status, _) = get(&app, "/search?q=paris").await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Health, stats and metrics
// ============================================================================

#[tokio::test]
async fn test_health_reports_readiness() {
    let (app, engine) = setup_app(None);

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["ready"], false);
    assert_eq!(body["messages_loaded"], 0);

    engine.populate(corpus());
    let (_, body) = get(&app, "/").await;
    assert_eq!(body["ready"], true);
    assert_eq!(body["messages_loaded"], 3);
}

#[tokio::test]
async fn test_stats_while_loading() {
    let (app, _) = setup_app(None);

    let (status, body) = get(&app, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "loading");
}

#[tokio::test]
async fn test_stats_when_loaded() {
    let (app, _) = setup_app(Some(corpus()));

    get(&app, "/search?q=paris").await;
    let (status, body) = get(&app, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_messages"], 3);
    assert_eq!(body["unique_users"], 3);
    assert_eq!(body["users"][0], "Armand Dupont");
    assert_eq!(body["loaded"], true);
    assert_eq!(body["search_requests"], 1);
    assert_eq!(body["requests_served"], 1);
    assert!(body["indexed_terms"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_metrics_counts_requests() {
    let (app, _) = setup_app(Some(corpus()));

    get(&app, "/search?q=paris").await;
    get(&app, "/search?q=hotel").await;
    get(&app, "/").await;
    let (status, body) = get(&app, "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["search_requests"], 2);
    assert_eq!(body["total_requests"], 2);
    assert_eq!(body["messages_in_memory"], 3);
}

#[tokio::test]
async fn test_only_validated_searches_are_counted() {
    let (app, _) = setup_app(Some(corpus()));

    get(&app, "/search?q=paris").await;
    get(&app, "/").await;
    get(&app, "/stats").await;
    let (rejected, _) = get(&app, "/search?limit=0").await;
    assert_eq!(rejected, StatusCode::UNPROCESSABLE_ENTITY);
    let (_, body) = get(&app, "/stats").await;

    assert_eq!(body["requests_served"], 1);
    assert_eq!(body["search_requests"], 1);
}

#[tokio::test]
async fn test_search_while_loading_is_still_counted() {
    let (app, _) = setup_app(None);

    let (status, _) = get(&app, "/search?q=paris").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let (_, body) = get(&app, "/metrics").await;

    assert_eq!(body["search_requests"], 1);
    assert_eq!(body["total_requests"], 1);
}

#[tokio::test]
async fn test_large_responses_are_gzipped() {
    let many: Vec<Message> = (0..100)
        .map(|i| message(&i.to_string(), "Sophia Al-Farsi", "Book a hotel in Paris"))
        .collect();
    let (app, _) = setup_app(Some(many));

    let request = Request::builder()
        .uri("/search?q=&limit=50")
        .header(header::ACCEPT_ENCODING, "gzip")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_ENCODING).unwrap(),
        "gzip"
    );
}
