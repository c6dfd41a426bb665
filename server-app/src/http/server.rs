//! HTTP Server configuration and startup.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use axum::{Router, routing::get};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use server_config::Config;

use super::handlers::{self, AppState};

/// HTTP server for the configured host and port.
pub struct HttpServer {
    state: Arc<AppState>,
}

impl HttpServer {
    /// Creates a server; `pool` is `None` when no database is configured.
    pub fn new(config: Config, pool: Option<PgPool>) -> Self {
        Self {
            state: Arc::new(AppState { config, pool }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Listen address on all interfaces. The port is only parsed here,
    /// since the configuration keeps it as text.
    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        let port = &self.state.config.port;
        let port: u16 = port
            .parse()
            .with_context(|| format!("PORT must be a TCP port number, got {:?}", port))?;
        Ok(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
    }

    /// Runs the server with graceful shutdown.
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr()?).await?;
        tracing::info!(
            "Server listening on {} (public host {})",
            listener.local_addr()?,
            self.state.config.public_host
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
