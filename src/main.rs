//! booksearch HTTP server entry point
//!
//! Waits for the search engine, then serves the document API.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booksearch::core::bootstrap::connect_with_retry;
use booksearch::core::config::Config;
use booksearch::core::engine::OpenSearchEngine;
use booksearch::core::services::Services;
use booksearch::http;

/// HTTP facade for indexing and searching book records
#[derive(Parser, Debug)]
#[command(name = "booksearch", version, about)]
struct Args {
    /// Path to a TOML config file (defaults to ./booksearch.toml if present)
    #[arg(long, env = "BOOKSEARCH_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booksearch=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting booksearch");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load(args.config.as_deref())?;
    config.log_config();

    // Block until the search engine answers
    let engine = connect_with_retry(config.engine.retry_policy(), || {
        OpenSearchEngine::connect(&config.engine, &config.search)
    })
    .await?;

    let addr = config.bind_addr();
    let services = Arc::new(Services::new(Arc::new(engine), config));
    let app = http::router(services);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("Service ready - Health check at http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
