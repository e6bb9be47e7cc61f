//! Core domain logic (protocol-agnostic)
//!
//! This module contains everything that is independent of the HTTP
//! transport.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error kinds and Result alias
//! - **types**: Documents, requests and responses
//! - **bootstrap**: Startup connection retry policy
//! - **engine**: Search engine trait and OpenSearch client
//! - **services**: Document operations over the shared engine

pub mod bootstrap;
pub mod config;
pub mod engine;
pub mod error;
pub mod services;
pub mod types;

// Re-export key types for convenience
pub use config::Config;
pub use error::{Result, SearchError};
pub use services::Services;
