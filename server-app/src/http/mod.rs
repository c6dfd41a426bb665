//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server bound to the configured port.

mod handlers;
mod server;

pub use server::HttpServer;
