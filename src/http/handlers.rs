//! HTTP request handlers for the booksearch API
//!
//! Implements the health check and the two document endpoints:
//! bulk create and fuzzy search.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::core::error::SearchError;
use crate::core::services::Services;
use crate::core::types::*;

/// Health check handler
///
/// Returns server status and version information.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create documents handler
///
/// Parses the body as a JSON array of document requests, assigns
/// ids and creation timestamps, and bulk indexes the whole batch.
/// The body is read raw so that a missing `Content-Type` header is
/// not an error.
///
/// # Returns
///
/// 200 with an empty body on success
///
/// # Errors
///
/// - `BadRequest`: Body is not an array of document objects
/// - `IndexFailure`: The engine rejected the bulk request
pub async fn create_documents_handler(
    State(services): State<Arc<Services>>,
    body: Bytes,
) -> Result<StatusCode, SearchError> {
    let requests: Vec<DocumentRequest> = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "Rejecting create request body");
        SearchError::BadRequest("Malformed request body".to_string())
    })?;

    services.create_documents(requests).await?;

    Ok(StatusCode::OK)
}

/// Search documents handler
///
/// Forwards `search` (or `searchTerm`) with `skip`/`take` paging to
/// the engine's multi_match query.
///
/// # Errors
///
/// - `BadRequest`: Query term missing or query string unreadable
/// - `QueryFailure`: The engine failed to run the query
pub async fn search_documents_handler(
    State(services): State<Arc<Services>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, SearchError> {
    let Query(params) = params.map_err(|e| SearchError::BadRequest(e.body_text()))?;

    let response = services.search_documents(params).await?;

    Ok(Json(response))
}
