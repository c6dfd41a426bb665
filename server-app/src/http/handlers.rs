//! HTTP request handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sqlx::PgPool;

use server_config::Config;

use crate::pool;

/// Application state shared across handlers.
pub struct AppState {
    pub config: Config,
    pub pool: Option<PgPool>,
}

/// Health check endpoint. Reports 503 when a configured database is down.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status, database) = match &state.pool {
        None => (StatusCode::OK, "not_configured"),
        Some(pool) => match pool::ping(pool).await {
            Ok(()) => (StatusCode::OK, "up"),
            Err(e) => {
                tracing::warn!(error = %e, "Health check could not reach database");
                (StatusCode::SERVICE_UNAVAILABLE, "down")
            }
        },
    };

    let body = serde_json::json!({
        "status": if status.is_success() { "healthy" } else { "unhealthy" },
        "public_host": state.config.public_host,
        "database": database,
    });

    (status, Json(body))
}
