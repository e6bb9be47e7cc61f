//! Configuration management for the booksearch service.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::bootstrap::RetryPolicy;
use crate::core::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "booksearch.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Search engine connection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Base URL of the Elasticsearch/OpenSearch node
    #[serde(default = "default_engine_url")]
    pub url: String,

    /// Index holding the documents
    #[serde(default = "default_index")]
    pub index: String,

    /// Seconds to wait between startup connection attempts
    #[serde(default = "default_retry_interval")]
    pub retry_interval_secs: u64,

    /// Give up after this many attempts (absent = retry forever)
    #[serde(default)]
    pub max_connect_attempts: Option<u32>,
}

/// Query shaping configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub default_skip: i64,

    #[serde(default = "default_take")]
    pub default_take: i64,

    /// Document fields matched by the multi_match query
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,

    /// Edit distance tolerance; empty disables fuzzy matching
    #[serde(default = "default_fuzziness")]
    pub fuzziness: String,

    #[serde(default = "default_minimum_should_match")]
    pub minimum_should_match: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_engine_url() -> String {
    "http://127.0.0.1:9200".to_string()
}

fn default_index() -> String {
    "books".to_string()
}

fn default_retry_interval() -> u64 {
    5
}

fn default_take() -> i64 {
    10
}

fn default_fields() -> Vec<String> {
    vec!["title".to_string(), "description".to_string()]
}

fn default_fuzziness() -> String {
    "2".to_string()
}

fn default_minimum_should_match() -> String {
    "2".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: default_engine_url(),
            index: default_index(),
            retry_interval_secs: default_retry_interval(),
            max_connect_attempts: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_skip: 0,
            default_take: default_take(),
            fields: default_fields(),
            fuzziness: default_fuzziness(),
            minimum_should_match: default_minimum_should_match(),
        }
    }
}

impl EngineConfig {
    /// Startup connection policy derived from this section
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            interval: Duration::from_secs(self.retry_interval_secs),
            max_attempts: self.max_connect_attempts,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// The TOML file is `path` when given, otherwise
    /// `./booksearch.toml` if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Server configuration
        if let Ok(host) = env::var("BOOKSEARCH_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("BOOKSEARCH_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Engine configuration
        if let Ok(url) = env::var("BOOKSEARCH_ENGINE_URL") {
            self.engine.url = url;
        }
        if let Ok(index) = env::var("BOOKSEARCH_INDEX") {
            self.engine.index = index;
        }
        if let Ok(interval) = env::var("BOOKSEARCH_RETRY_INTERVAL_SECS") {
            if let Ok(secs) = interval.parse() {
                self.engine.retry_interval_secs = secs;
            }
        }
        if let Ok(attempts) = env::var("BOOKSEARCH_MAX_CONNECT_ATTEMPTS") {
            if let Ok(n) = attempts.parse() {
                self.engine.max_connect_attempts = Some(n);
            }
        }

        // Search configuration
        if let Ok(take) = env::var("BOOKSEARCH_DEFAULT_TAKE") {
            if let Ok(t) = take.parse() {
                self.search.default_take = t;
            }
        }
        if let Ok(fuzziness) = env::var("BOOKSEARCH_FUZZINESS") {
            self.search.fuzziness = fuzziness;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.engine.url.trim().is_empty() {
            return Err(SearchError::ConfigError(
                "Engine URL must not be empty".to_string(),
            ));
        }

        if self.engine.index.trim().is_empty() {
            return Err(SearchError::ConfigError(
                "Index name must not be empty".to_string(),
            ));
        }

        if self.engine.retry_interval_secs == 0 {
            return Err(SearchError::ConfigError(
                "Retry interval must be non-zero".to_string(),
            ));
        }

        if self.engine.max_connect_attempts == Some(0) {
            return Err(SearchError::ConfigError(
                "Max connect attempts must be non-zero when set".to_string(),
            ));
        }

        if self.search.fields.is_empty() {
            return Err(SearchError::ConfigError(
                "At least one search field is required".to_string(),
            ));
        }

        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.bind_addr());
        tracing::info!("  Engine URL: {}", self.engine.url);
        tracing::info!("  Index: {}", self.engine.index);
        tracing::info!("  Retry interval: {}s", self.engine.retry_interval_secs);
        match self.engine.max_connect_attempts {
            Some(n) => tracing::info!("  Max connect attempts: {}", n),
            None => tracing::info!("  Max connect attempts: unlimited"),
        }
        tracing::info!("  Search fields: {:?}", self.search.fields);
        tracing::info!("  Fuzziness: {:?}", self.search.fuzziness);
        tracing::info!(
            "  Minimum should match: {}",
            self.search.minimum_should_match
        );
        tracing::info!(
            "  Default page: skip={} take={}",
            self.search.default_skip,
            self.search.default_take
        );
    }
}
