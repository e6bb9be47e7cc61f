//! HTTP mapping for [`SearchError`].
//!
//! Every error leaves as `{"error": "<message>"}`. Only bad requests
//! carry their own message; server-side causes are logged here and
//! replaced by a generic one.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::core::error::SearchError;

/// HTTP status for an error kind
pub fn status_code(err: &SearchError) -> StatusCode {
    if err.is_bad_request() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = status_code(&self);

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed in search engine layer");
        }

        let body = Json(json!({ "error": self.client_message() }));
        (status, body).into_response()
    }
}
