//! # Server App
//!
//! Consumers of the loaded configuration:
//! - `pool/` - Postgres connection pool built from `DatabaseConfig`
//! - `http/` - Axum server listening on the configured port

pub mod http;
pub mod pool;

#[cfg(test)]
mod pool_tests;
