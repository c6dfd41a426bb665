//! # Server Config
//!
//! Typed configuration for the server, resolved from environment variables.
//! Every field falls back to a built-in default when its variable is absent,
//! and integer fields also fall back when the value does not parse.
//!
//! ## Layout
//!
//! - `config/` - The `Config` and `DatabaseConfig` records and their defaults
//! - `source/` - The `EnvSource` port and its process / in-memory adapters
//! - `loader/` - Lenient and strict resolution of a `Config` from a source
//! - `error/` - Errors reported by the strict loader

pub mod config;
pub mod error;
pub mod loader;
pub mod source;


pub use config::{Config, DatabaseConfig};
pub use error::ConfigError;
pub use loader::load_config;
pub use source::{EnvSource, MapEnv, ProcessEnv};
