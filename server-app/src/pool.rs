//! Database connection pool construction.
//!
//! The loader stores pool settings exactly as given, so values sqlx cannot
//! accept are handled here: they keep sqlx's default and log a warning.

use std::time::{Duration, Instant};

use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::task::JoinHandle;

use server_config::{Config, DatabaseConfig};

fn connection_count(value: i64, floor: u32, name: &str) -> Option<u32> {
    match u32::try_from(value) {
        Ok(v) if v >= floor => Some(v),
        _ => {
            tracing::warn!(value, "Ignoring unusable {} setting", name);
            None
        }
    }
}

/// sqlx adds these to `Instant::now()` unchecked, so they must not overflow.
fn fits_deadline(value: Duration) -> bool {
    Instant::now().checked_add(value).is_some()
}

fn duration(value: Option<Duration>, raw: i64, name: &str) -> Option<Duration> {
    match value {
        Some(value) if fits_deadline(value) => Some(value),
        Some(_) => {
            tracing::warn!(value = raw, "Ignoring out-of-range {} setting", name);
            None
        }
        None => {
            tracing::warn!(value = raw, "Ignoring negative {} setting", name);
            None
        }
    }
}

/// Translates pool settings into sqlx pool options.
pub fn pool_options(db: &DatabaseConfig) -> PgPoolOptions {
    let mut options = PgPoolOptions::new();

    if let Some(max) = connection_count(db.max_connections, 1, "max_connections") {
        options = options.max_connections(max);
    }

    if let Some(mut min) = connection_count(db.min_connections, 0, "min_connections") {
        let ceiling = options.get_max_connections();
        if min > ceiling {
            tracing::warn!(min, max = ceiling, "min_connections exceeds max_connections, clamping");
            min = ceiling;
        }
        options = options.min_connections(min);
    }

    if let Some(lifetime) = duration(
        db.max_conn_lifetime_duration(),
        db.max_conn_lifetime,
        "max_conn_lifetime",
    ) {
        options = options.max_lifetime(lifetime);
    }

    if let Some(idle) = duration(
        db.max_conn_idle_time_duration(),
        db.max_conn_idle_time,
        "max_conn_idle_time",
    ) {
        options = options.idle_timeout(idle);
    }

    match db.connect_timeout_duration() {
        Some(timeout) if !timeout.is_zero() && fits_deadline(timeout) => {
            options = options.acquire_timeout(timeout)
        }
        _ => tracing::warn!(
            value = db.connect_timeout,
            "Ignoring unusable connect_timeout setting"
        ),
    }

    options
}

/// Builds a lazily connecting pool, or `None` when no database URL is set.
///
/// Must be called from within a tokio runtime.
pub fn connect(config: &Config) -> anyhow::Result<Option<PgPool>> {
    if config.database_url.is_empty() {
        tracing::info!("DATABASE_URL is empty, running without a database");
        return Ok(None);
    }

    let pool = pool_options(&config.database)
        .connect_lazy(&config.database_url)
        .map_err(|e| anyhow::anyhow!("Invalid DATABASE_URL: {}", e))?;

    tracing::info!(
        database_url = %config.redacted_database_url(),
        max_connections = pool.options().get_max_connections(),
        min_connections = pool.options().get_min_connections(),
        "Database pool configured"
    );

    Ok(Some(pool))
}

/// Round-trips a trivial query through the pool.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}

/// Pings the pool every `health_check_period` seconds in the background.
///
/// Returns `None` without spawning when the period is zero or negative.
pub fn spawn_health_checks(pool: PgPool, db: &DatabaseConfig) -> Option<JoinHandle<()>> {
    let period = db
        .health_check_period_duration()
        .filter(|period| !period.is_zero())?;

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // First tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match ping(&pool).await {
                Ok(()) => tracing::debug!("Database health check passed"),
                Err(e) => tracing::warn!(error = %e, "Database health check failed"),
            }
        }
    }))
}
