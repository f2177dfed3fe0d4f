//! Integration tests for the full export pipeline.
//!
//! These tests exercise pagination, retry, normalization, and CSV
//! serialization together against a mock reviews API.

use std::time::Duration;

use review_export::{
    ApiConfig, ExportEngine, FetchError, RetryPolicy, ReviewsClient, reviews_to_csv,
    run_review_export,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine_for(server: &MockServer, max_retries: u32) -> ExportEngine {
    let config = ApiConfig::with_base_url(format!("{}/reviews.json", server.uri()));
    let client = ReviewsClient::new(config, RetryPolicy::new(max_retries, Duration::from_millis(5)));
    ExportEngine::new(client).with_pagination(100, Duration::from_millis(1))
}

#[tokio::test]
async fn test_two_page_run_normalizes_and_serializes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reviews.json"))
        .and(query_param("Offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Results": (0..100).map(|_| json!({
                "IsRecommended": true,
                "Rating": 5,
                "Title": "Love it",
                "ReviewText": "Would buy again."
            })).collect::<Vec<_>>(),
            "TotalResults": 102
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/reviews.json"))
        .and(query_param("Offset", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Results": [
                { "IsRecommended": false, "Rating": 3, "Title": "ok", "ReviewText": "fine" },
                {}
            ],
            "TotalResults": 102
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server, 1);
    let outcome = run_review_export(&engine, "P481234", None).await.unwrap();

    assert_eq!(outcome.reviews.len(), 102);
    assert_eq!(outcome.pages_fetched, 2);
    assert_eq!(outcome.total_results, 102);

    // The record with no fields picked up every default.
    let last = &outcome.reviews[101];
    assert_eq!(last.rating_display(), "N/A");
    assert_eq!(last.title, "No Title");
    assert_eq!(last.review_text, "No Review Text");

    let csv_text = reviews_to_csv(&outcome.reviews).unwrap().unwrap();
    let mut lines = csv_text.lines();
    assert_eq!(lines.next(), Some("Recommended,Rating,Title,Review Text"));
    assert_eq!(
        lines.next(),
        Some(r#""Yes","5","Love it","Would buy again.""#)
    );
    assert_eq!(csv_text.lines().count(), 103);
}

#[tokio::test]
async fn test_transient_failures_are_absorbed_mid_run() {
    let server = MockServer::start().await;

    // First page succeeds immediately.
    Mock::given(method("GET"))
        .and(path("/reviews.json"))
        .and(query_param("Offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Results": (0..100).map(|_| json!({})).collect::<Vec<_>>(),
            "TotalResults": 101
        })))
        .mount(&server)
        .await;

    // Second page 503s twice before succeeding.
    Mock::given(method("GET"))
        .and(path("/reviews.json"))
        .and(query_param("Offset", "100"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/reviews.json"))
        .and(query_param("Offset", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Results": [{ "Rating": 4 }],
            "TotalResults": 101
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server, 3);
    let outcome = run_review_export(&engine, "P1", None).await.unwrap();

    assert_eq!(outcome.reviews.len(), 101);
    assert_eq!(outcome.pages_fetched, 2);
}

#[tokio::test]
async fn test_exhausted_retries_abort_with_partial_reviews() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reviews.json"))
        .and(query_param("Offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Results": (0..100).map(|_| json!({ "Rating": 2 })).collect::<Vec<_>>(),
            "TotalResults": 300
        })))
        .mount(&server)
        .await;

    // Second page never recovers.
    Mock::given(method("GET"))
        .and(path("/reviews.json"))
        .and(query_param("Offset", "100"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let engine = engine_for(&server, 1);
    let aborted = run_review_export(&engine, "P1", None).await.unwrap_err();

    assert_eq!(aborted.pages_fetched, 1);
    assert_eq!(aborted.partial.len(), 100);
    match &aborted.source {
        FetchError::RetriesExhausted { attempts, .. } => assert_eq!(*attempts, 2),
        other => panic!("Expected RetriesExhausted, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_request_carries_product_filter_and_passkey() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reviews.json"))
        .and(query_param("Filter", "ProductId:P99"))
        .and(query_param("Limit", "100"))
        .and(query_param("apiversion", "5.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Results": [],
            "TotalResults": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server, 0);
    let outcome = run_review_export(&engine, "P99", None).await.unwrap();
    assert!(outcome.reviews.is_empty());
}
