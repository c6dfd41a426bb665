//! # Server Application
//!
//! Binary that wires together all the components:
//! - Load `.env` and initialize logging
//! - Load configuration from environment
//! - Build the database pool, when a URL is configured
//! - Start the HTTP server

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use server_app::{http::HttpServer, pool};
use server_config::{Config, ProcessEnv};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_app=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The loader substitutes defaults silently; surface what it skipped.
    for err in Config::invalid_entries(&ProcessEnv) {
        tracing::warn!(key = err.key(), "{}; using the default", err);
    }

    let config = server_config::load_config();

    tracing::info!(
        public_host = %config.public_host,
        port = %config.port,
        database_url = %config.redacted_database_url(),
        "Configuration loaded"
    );
    tracing::debug!(database = ?config.database, "Pool settings");

    let pool = pool::connect(&config)?;
    let health_checks = pool
        .as_ref()
        .and_then(|pool| pool::spawn_health_checks(pool.clone(), &config.database));

    let server = HttpServer::new(config, pool);
    server.run().await?;

    if let Some(handle) = health_checks {
        handle.abort();
    }
    Ok(())
}
