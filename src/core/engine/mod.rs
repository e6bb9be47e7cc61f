//! Search engine abstraction.
//!
//! All indexing, scoring and persistence happen inside an external
//! Elasticsearch/OpenSearch node. This module defines the narrow
//! interface the service needs from it and the query body it sends.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::core::config::SearchConfig;
use crate::core::error::Result;
use crate::core::types::{Document, DocumentQuery, SearchPage};

pub mod opensearch_engine;

pub use opensearch_engine::OpenSearchEngine;

/// Operations the service delegates to the search engine
///
/// Implementations must be safe to share across request tasks.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Submit all documents in one bulk index request, keyed by id
    ///
    /// Any failure fails the whole batch.
    async fn bulk_index(&self, documents: &[Document]) -> Result<()>;

    /// Run a query and return one page of raw hits
    async fn search(&self, query: &DocumentQuery) -> Result<SearchPage>;
}

/// Explicit mapping for the document index
///
/// `pages` is `long` so any `i64` page count round-trips.
pub fn index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "isbn": { "type": "keyword" },
                "title": { "type": "text" },
                "subtitle": { "type": "text" },
                "author": { "type": "text" },
                "published": { "type": "date" },
                "publisher": { "type": "text" },
                "pages": { "type": "long" },
                "description": { "type": "text" },
                "website": { "type": "keyword" },
                "created_at": { "type": "date" }
            }
        }
    })
}

/// Build the `multi_match` query body for a search term
///
/// Fuzziness is omitted when the configured value is empty.
pub fn multi_match_body(term: &str, config: &SearchConfig) -> Value {
    let mut multi_match = json!({
        "query": term,
        "fields": config.fields,
        "minimum_should_match": config.minimum_should_match,
    });

    if !config.fuzziness.is_empty() {
        multi_match["fuzziness"] = json!(config.fuzziness);
    }

    json!({ "query": { "multi_match": multi_match } })
}

/// Read the total hit count from a search response
///
/// Older engines report a bare number, newer ones `{"value": n, ...}`.
pub(crate) fn total_hits(hits: &Value) -> u64 {
    match &hits["total"] {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::Object(obj) => obj.get("value").and_then(Value::as_u64).unwrap_or(0),
        _ => 0,
    }
}

/// Extract a [`SearchPage`] from a raw search response body
pub(crate) fn parse_search_page(body: &Value) -> SearchPage {
    let sources = body["hits"]["hits"]
        .as_array()
        .map(|hits| hits.iter().map(|h| h["_source"].clone()).collect())
        .unwrap_or_default();

    SearchPage {
        took_ms: body["took"].as_u64().unwrap_or(0),
        total_hits: total_hits(&body["hits"]),
        sources,
    }
}

/// First item error of a bulk response that reports `errors: true`
///
/// Returns `None` when the batch went through. A failed batch whose
/// items carry no error detail yields `Some(Value::Null)`.
pub(crate) fn bulk_item_error(body: &Value) -> Option<Value> {
    if !body["errors"].as_bool().unwrap_or(false) {
        return None;
    }

    let first = body["items"]
        .as_array()
        .and_then(|items| {
            items
                .iter()
                .find_map(|item| item["index"].get("error").cloned())
        })
        .unwrap_or(Value::Null);

    Some(first)
}
