//! HTTP REST adapter
//!
//! Depends only on core/. Exposes the document endpoints via the
//! Axum web framework.

pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::core::services::Services;

pub use handlers::*;

/// Build the API router over shared services
pub fn router(services: Arc<Services>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/documents",
            get(search_documents_handler).post(create_documents_handler),
        )
        .layer(axum_middleware::from_fn(middleware::log_request))
        .layer(CorsLayer::permissive())
        .with_state(services)
}
