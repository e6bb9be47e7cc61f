//! Error types and error handling for the booksearch service.
//!
//! This module defines the error kinds used throughout the
//! application. Mapping to HTTP status codes lives in the `http`
//! adapter; here we only classify errors and decide what a caller
//! is allowed to see.

use thiserror::Error;

/// Result type alias for booksearch operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Message returned to clients when a bulk index request fails
pub const INDEX_FAILURE_MESSAGE: &str = "Failed to create documents";

/// Message returned to clients for any other server-side failure
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// Main error type for the booksearch service
#[derive(Error, Debug)]
pub enum SearchError {
    /// Client sent something we cannot act on. The message is
    /// returned to the caller verbatim.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Index failure: {0}")]
    IndexFailure(String),

    #[error("Query failure: {0}")]
    QueryFailure(String),

    #[error("Search engine unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl SearchError {
    /// Message safe to expose to an HTTP client
    ///
    /// Only bad requests echo their message; downstream causes stay
    /// in the server log.
    pub fn client_message(&self) -> String {
        match self {
            SearchError::BadRequest(msg) => msg.clone(),
            SearchError::IndexFailure(_) => INDEX_FAILURE_MESSAGE.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(self, SearchError::BadRequest(_))
    }
}

impl From<opensearch::Error> for SearchError {
    fn from(err: opensearch::Error) -> Self {
        SearchError::UpstreamUnavailable(err.to_string())
    }
}
