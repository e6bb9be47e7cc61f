//! Elasticsearch/OpenSearch backed [`SearchEngine`].
//!
//! Talks to a single node over its REST API using the `opensearch`
//! client. The client is cheap to share and safe for concurrent use,
//! so one instance serves every request for the process lifetime.

use async_trait::async_trait;
use opensearch::http::response::Response;
use opensearch::http::transport::Transport;
use opensearch::indices::IndicesCreateParts;
use opensearch::{BulkOperation, BulkParts, OpenSearch, SearchParts};
use serde_json::Value;

use super::{
    bulk_item_error, index_mapping, multi_match_body, parse_search_page, SearchEngine,
};
use crate::core::config::{EngineConfig, SearchConfig};
use crate::core::error::{Result, SearchError};
use crate::core::types::{Document, DocumentQuery, SearchPage};

pub struct OpenSearchEngine {
    client: OpenSearch,
    index: String,
    search: SearchConfig,
}

impl OpenSearchEngine {
    /// Build a client for `engine.url`, check the node answers a ping
    /// and make sure the document index exists
    ///
    /// # Errors
    ///
    /// `UpstreamUnavailable` if the node cannot be reached or refuses
    /// to create the index.
    pub async fn connect(engine: &EngineConfig, search: &SearchConfig) -> Result<Self> {
        let transport = Transport::single_node(&engine.url)?;
        let client = OpenSearch::new(transport);

        let ping = client.ping().send().await?;
        if !ping.status_code().is_success() {
            return Err(SearchError::UpstreamUnavailable(format!(
                "ping returned {}",
                ping.status_code()
            )));
        }

        let this = Self {
            client,
            index: engine.index.clone(),
            search: search.clone(),
        };
        this.ensure_index().await?;

        Ok(this)
    }

    /// Create the index with an explicit mapping unless it exists
    async fn ensure_index(&self) -> Result<()> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&self.index))
            .body(index_mapping())
            .send()
            .await?;

        if response.status_code().is_success() {
            tracing::info!(index = %self.index, "Created index");
            return Ok(());
        }

        let status = response.status_code();
        let body = response.text().await?;
        if body.contains("resource_already_exists_exception") {
            tracing::debug!(index = %self.index, "Index already exists");
            return Ok(());
        }

        Err(SearchError::UpstreamUnavailable(format!(
            "failed to create index '{}' ({status}): {body}",
            self.index
        )))
    }
}

/// Read a JSON body, failing on non-success status codes
async fn json_body(response: Response) -> std::result::Result<Value, String> {
    let status = response.status_code();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(format!("engine returned {status}: {body}"));
    }
    response.json::<Value>().await.map_err(|e| e.to_string())
}

#[async_trait]
impl SearchEngine for OpenSearchEngine {
    async fn bulk_index(&self, documents: &[Document]) -> Result<()> {
        let ops: Vec<BulkOperation<&Document>> = documents
            .iter()
            .map(|doc| BulkOperation::index(doc).id(doc.id.as_str()).into())
            .collect();

        let response = self
            .client
            .bulk(BulkParts::Index(&self.index))
            .body(ops)
            .send()
            .await
            .map_err(|e| SearchError::IndexFailure(e.to_string()))?;

        let body = json_body(response).await.map_err(SearchError::IndexFailure)?;

        // Per-item failures still come back as 200
        if let Some(error) = bulk_item_error(&body) {
            return Err(SearchError::IndexFailure(format!(
                "bulk request reported item errors: {error}"
            )));
        }

        tracing::debug!(count = documents.len(), index = %self.index, "Bulk indexed documents");
        Ok(())
    }

    async fn search(&self, query: &DocumentQuery) -> Result<SearchPage> {
        let response = self
            .client
            .search(SearchParts::Index(&[self.index.as_str()]))
            .from(query.skip)
            .size(query.take)
            .body(multi_match_body(&query.term, &self.search))
            .send()
            .await
            .map_err(|e| SearchError::QueryFailure(e.to_string()))?;

        let body = json_body(response).await.map_err(SearchError::QueryFailure)?;

        Ok(parse_search_page(&body))
    }
}
