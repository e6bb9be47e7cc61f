//! booksearch - HTTP facade over an Elasticsearch/OpenSearch index
//!
//! Accepts batches of book records, bulk indexes them in an external
//! search engine, and exposes a fuzzy multi-field search over them.
//! Ranking, storage and consistency all live in the engine.
//!
//! # Architecture
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types
//!   - bootstrap (startup connection retry)
//!   - engine (search engine trait, OpenSearch client)
//!   - services (create and search operations)
//!
//! - **http**: REST adapter (depends on core)
//!   - handlers, middleware, error mapping, router

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP REST adapter
pub mod http;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::engine::SearchEngine;
pub use crate::core::error::{Result, SearchError};
pub use crate::core::services::Services;
pub use crate::core::types::*;
