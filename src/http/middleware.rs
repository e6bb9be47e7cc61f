//! Middleware for the booksearch API
//!
//! Logs each request with the document operation it maps to and,
//! for searches, the term and paging the client asked for.

use axum::{
    body::Body,
    extract::Query,
    http::{Method, Request, Uri},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};

use crate::core::types::SearchParams;

/// Name of the operation a request targets, used as a log field
pub(crate) fn operation(method: &Method, path: &str) -> &'static str {
    match (method, path) {
        (&Method::POST, "/documents") => "create_documents",
        (&Method::GET, "/documents") => "search_documents",
        (&Method::GET, "/health") => "health",
        _ => "other",
    }
}

/// Raw search parameters of a request URI, empty when absent or
/// undecodable
pub(crate) fn search_params(uri: &Uri) -> SearchParams {
    Query::<SearchParams>::try_from_uri(uri)
        .map(|Query(params)| params)
        .unwrap_or_default()
}

/// Request logging middleware
///
/// Completed requests log at INFO, client errors at WARN and server
/// errors at ERROR.
pub async fn log_request(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let op = operation(&method, uri.path());
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();
    let params = if op == "search_documents" {
        search_params(&uri)
    } else {
        SearchParams::default()
    };
    let search = params.search.as_deref().unwrap_or("");
    let skip = params.skip.as_deref().unwrap_or("");
    let take = params.take.as_deref().unwrap_or("");

    if response.status().is_server_error() {
        error!(op, %method, %uri, status, duration_ms, search, skip, take, "Request failed");
    } else if response.status().is_client_error() {
        warn!(op, %method, %uri, status, duration_ms, search, skip, take, "Request rejected");
    } else {
        info!(op, %method, %uri, status, duration_ms, search, skip, take, "Request completed");
    }

    response
}
