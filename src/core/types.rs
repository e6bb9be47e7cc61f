//! Core data types for the booksearch service.
//!
//! This module defines the stored document, the request and
//! response shapes of the HTTP surface, and the query handed to the
//! search engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A book as stored in the search engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Generated identifier, also used as the engine document id
    pub id: String,
    pub isbn: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub published: DateTime<Utc>,
    pub publisher: String,
    pub pages: i64,
    pub description: String,
    pub website: String,

    /// Server-assigned creation time (UTC)
    pub created_at: DateTime<Utc>,
}

/// Payload accepted by the create endpoint
///
/// Fields missing from the JSON object, or set to `null`, take their
/// zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub isbn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub published: DateTime<Utc>,
    #[serde(deserialize_with = "null_as_default")]
    pub publisher: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pages: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub website: String,
}

impl Document {
    /// Build a new document from a request, assigning a fresh id and
    /// stamping `created_at`
    pub fn from_request(req: DocumentRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(),
            isbn: req.isbn,
            title: req.title,
            subtitle: req.subtitle,
            author: req.author,
            published: req.published,
            publisher: req.publisher,
            pages: req.pages,
            description: req.description,
            website: req.website,
            created_at,
        }
    }
}

/// Decode a field, treating an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Generate a document identifier (random UUID v4, simple form)
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// A document as returned by the search endpoint
///
/// Decoded from the engine's `_source`; unknown fields are ignored
/// and missing or `null` ones take their zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub isbn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub published: DateTime<Utc>,
    #[serde(deserialize_with = "null_as_default")]
    pub publisher: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pages: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: DateTime<Utc>,
}

/// Search endpoint response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Engine-reported elapsed time in milliseconds
    pub time: String,

    /// Total number of matching documents
    pub hits: String,

    /// Matched documents in engine relevance order
    pub documents: Vec<DocumentResponse>,
}

/// Raw query string of the search endpoint
///
/// `skip` and `take` stay strings so that unparsable values can fall
/// back to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(alias = "searchTerm")]
    pub search: Option<String>,
    pub skip: Option<String>,
    pub take: Option<String>,
}

/// A validated query ready for the search engine
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentQuery {
    pub term: String,
    pub skip: i64,
    pub take: i64,
}

/// One page of raw results returned by the engine
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub took_ms: u64,
    pub total_hits: u64,

    /// `_source` of each hit, in engine order
    pub sources: Vec<serde_json::Value>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
