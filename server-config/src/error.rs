//! Error types for configuration loading.

use std::num::ParseIntError;

/// Errors surfaced by the strict loader.
///
/// The lenient loader never produces these; it substitutes defaults instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a base-10 integer, got {value:?}")]
    InvalidInteger {
        key: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl ConfigError {
    /// Name of the environment variable the error refers to.
    pub fn key(&self) -> &'static str {
        match self {
            ConfigError::InvalidInteger { key, .. } => *key,
        }
    }
}
