//! Integration tests for the booksearch REST API
//!
//! Tests the create and search endpoints end to end, including the
//! error envelope and paging defaults.

use std::collections::HashSet;
use std::sync::atomic::Ordering;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use booksearch::core::types::{HealthResponse, SearchResponse};
use serde_json::{json, Value};
use tower::ServiceExt as TowerServiceExt;

use crate::common::{create_test_app, dune_request, sample_requests};

async fn post_documents(app: &Router, body: impl Into<Body>) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/documents")
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 100_000)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _engine) = create_test_app();

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[tokio::test]
async fn test_create_returns_empty_ok() {
    let (app, engine) = create_test_app();

    let response = post_documents(&app, sample_requests().to_string()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
    assert_eq!(engine.bulk_calls.load(Ordering::SeqCst), 1);
    assert_eq!(engine.documents().len(), 3);
}

#[tokio::test]
async fn test_create_assigns_distinct_ids() {
    let (app, engine) = create_test_app();

    let batch: Vec<Value> = (0..50)
        .map(|i| json!({ "title": format!("Volume {i}") }))
        .collect();
    let response = post_documents(&app, Value::from(batch).to_string()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let docs = engine.documents();
    let ids: HashSet<&str> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(docs.len(), 50);
    assert_eq!(ids.len(), 50);
    assert!(docs.iter().all(|d| !d.id.is_empty()));
}

#[tokio::test]
async fn test_create_copies_fields_verbatim() {
    let (app, engine) = create_test_app();

    let response = post_documents(&app, json!([dune_request()]).to_string()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = &engine.documents()[0];
    assert_eq!(doc.title, "Dune");
    assert_eq!(doc.author, "Herbert");
    assert_eq!(doc.pages, 412);
    assert_eq!(doc.website, "https://dunenovels.com");
    assert_eq!(doc.published.to_rfc3339(), "1965-08-01T00:00:00+00:00");
}

#[tokio::test]
async fn test_create_accepts_odd_values() {
    let (app, engine) = create_test_app();

    let body = json!([{ "title": "", "pages": -3, "published": "0001-01-01T00:00:00Z" }]);
    let response = post_documents(&app, body.to_string()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(engine.documents()[0].pages, -3);
}

#[tokio::test]
async fn test_create_null_fields_take_zero_values() {
    let (app, engine) = create_test_app();

    let body = json!([{
        "title": "Dune",
        "author": "Herbert",
        "subtitle": null,
        "published": null
    }]);
    let response = post_documents(&app, body.to_string()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let docs = engine.documents();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].title, "Dune");
    assert!(docs[0].subtitle.is_empty());

    let response = get(&app, "/documents?search=Dune").await;
    let result: SearchResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(result.documents.len(), 1);
    assert_eq!(result.documents[0].author, "Herbert");
}

#[tokio::test]
async fn test_create_empty_array() {
    let (app, engine) = create_test_app();

    let response = post_documents(&app, "[]").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(engine.bulk_calls.load(Ordering::SeqCst), 0);
    assert!(engine.documents().is_empty());
}

#[tokio::test]
async fn test_create_malformed_bodies() {
    let (app, engine) = create_test_app();

    for body in [
        "not json",
        r#"{"title": "Dune"}"#,
        r#"[{"title": "Dune"}, 42]"#,
        r#"[{"pages": "many"}]"#,
        "",
    ] {
        let response = post_documents(&app, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Malformed request body" })
        );
    }

    assert_eq!(engine.bulk_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_create_without_content_type() {
    let (app, engine) = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/documents")
                .body(Body::from(json!([dune_request()]).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(engine.documents().len(), 1);
}

#[tokio::test]
async fn test_create_engine_failure() {
    let (app, engine) = create_test_app();
    engine.set_failing(true);

    let response = post_documents(&app, sample_requests().to_string()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Failed to create documents" })
    );
}

#[tokio::test]
async fn test_round_trip_create_then_search() {
    let (app, _engine) = create_test_app();

    let response = post_documents(&app, sample_requests().to_string()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app, "/documents?search=Dune").await;
    assert_eq!(response.status(), StatusCode::OK);

    let result: SearchResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(result.hits, "1");
    assert_eq!(result.time, "1");
    assert_eq!(result.documents.len(), 1);
    assert_eq!(result.documents[0].title, "Dune");
    assert_eq!(result.documents[0].author, "Herbert");
    assert!(!result.documents[0].id.is_empty());
}

#[tokio::test]
async fn test_search_envelope_uses_strings() {
    let (app, _engine) = create_test_app();
    post_documents(&app, sample_requests().to_string()).await;

    let body = body_json(get(&app, "/documents?search=e").await).await;

    assert!(body["time"].is_string());
    assert!(body["hits"].is_string());
    assert!(body["documents"].is_array());
}

#[tokio::test]
async fn test_search_term_alias() {
    let (app, _engine) = create_test_app();
    post_documents(&app, sample_requests().to_string()).await;

    let response = get(&app, "/documents?searchTerm=Foundation").await;
    assert_eq!(response.status(), StatusCode::OK);

    let result: SearchResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(result.documents[0].author, "Isaac Asimov");
}

#[tokio::test]
async fn test_search_missing_term() {
    let (app, engine) = create_test_app();

    for uri in [
        "/documents",
        "/documents?skip=1&take=2",
        "/documents?search=",
        "/documents?take=abc",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Query not specified" })
        );
    }

    assert!(engine.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_non_numeric_paging_uses_defaults() {
    let (app, engine) = create_test_app();

    get(&app, "/documents?search=dune").await;
    get(&app, "/documents?search=dune&skip=abc&take=xyz").await;

    let queries = engine.queries.lock().unwrap();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0], queries[1]);
    assert_eq!(queries[0].skip, 0);
    assert_eq!(queries[0].take, 10);
}

#[tokio::test]
async fn test_search_paging_forwarded() {
    let (app, engine) = create_test_app();
    let batch: Vec<Value> = (0..5)
        .map(|i| json!({ "title": format!("Saga part {i}") }))
        .collect();
    post_documents(&app, Value::from(batch).to_string()).await;

    let response = get(&app, "/documents?search=saga&skip=1&take=2").await;
    let result: SearchResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();

    assert_eq!(result.hits, "5");
    assert_eq!(result.documents.len(), 2);
    assert_eq!(result.documents[0].title, "Saga part 1");

    let queries = engine.queries.lock().unwrap();
    assert_eq!(queries[0].skip, 1);
    assert_eq!(queries[0].take, 2);
}

#[tokio::test]
async fn test_search_engine_failure() {
    let (app, engine) = create_test_app();
    engine.set_failing(true);

    let response = get(&app, "/documents?search=dune").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Something went wrong" })
    );
}

#[tokio::test]
async fn test_concurrent_creates_never_collide() {
    let (app, engine) = create_test_app();

    let tasks: Vec<_> = (0..8)
        .map(|n| {
            let app = app.clone();
            tokio::spawn(async move {
                let batch: Vec<Value> = (0..25)
                    .map(|i| json!({ "title": format!("Batch {n} item {i}") }))
                    .collect();
                post_documents(&app, Value::from(batch).to_string())
                    .await
                    .status()
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }

    let docs = engine.documents();
    let ids: HashSet<&str> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(docs.len(), 200);
    assert_eq!(ids.len(), 200);
}
