//! Unified service container for booksearch
//!
//! Holds the shared search engine handle and configuration, and
//! implements the two document operations on top of them.

use chrono::Utc;
use std::sync::Arc;

use crate::core::config::Config;
use crate::core::engine::SearchEngine;
use crate::core::error::{Result, SearchError};
use crate::core::types::{
    Document, DocumentQuery, DocumentRequest, DocumentResponse, SearchParams, SearchResponse,
};

/// Unified services container
///
/// Cloned into every request handler; the engine handle itself is
/// shared, never rebuilt.
#[derive(Clone)]
pub struct Services {
    /// Search engine handle established at startup
    pub engine: Arc<dyn SearchEngine>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    pub fn new(engine: Arc<dyn SearchEngine>, config: Config) -> Self {
        Self {
            engine,
            config: Arc::new(config),
        }
    }

    /// Assign ids and timestamps to a batch and bulk index it
    ///
    /// Returns the number of documents submitted. An empty batch is
    /// accepted without contacting the engine.
    pub async fn create_documents(&self, requests: Vec<DocumentRequest>) -> Result<usize> {
        if requests.is_empty() {
            return Ok(0);
        }

        let created_at = Utc::now();
        let documents: Vec<Document> = requests
            .into_iter()
            .map(|req| Document::from_request(req, created_at))
            .collect();

        self.engine.bulk_index(&documents).await?;

        tracing::info!(count = documents.len(), "Indexed documents");
        Ok(documents.len())
    }

    /// Resolve query parameters into a [`DocumentQuery`]
    ///
    /// A missing or empty term is a bad request. `skip`/`take` fall
    /// back to the configured defaults when absent or not integers.
    pub fn build_query(&self, params: SearchParams) -> Result<DocumentQuery> {
        let term = match params.search {
            Some(term) if !term.is_empty() => term,
            _ => return Err(SearchError::BadRequest("Query not specified".to_string())),
        };

        let skip = parse_or(params.skip.as_deref(), self.config.search.default_skip);
        let take = parse_or(params.take.as_deref(), self.config.search.default_take);

        Ok(DocumentQuery { term, skip, take })
    }

    /// Run a search and reshape the engine's answer
    pub async fn search_documents(&self, params: SearchParams) -> Result<SearchResponse> {
        let query = self.build_query(params)?;
        let page = self.engine.search(&query).await?;

        let documents = page
            .sources
            .into_iter()
            .map(|source| {
                serde_json::from_value::<DocumentResponse>(source).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Undecodable hit, returning empty document");
                    DocumentResponse::default()
                })
            })
            .collect();

        Ok(SearchResponse {
            time: page.took_ms.to_string(),
            hits: page.total_hits.to_string(),
            documents,
        })
    }
}

fn parse_or(value: Option<&str>, default: i64) -> i64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}
