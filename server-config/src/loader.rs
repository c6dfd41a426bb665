//! Resolution of a `Config` from an environment source.
//!
//! Each field is looked up independently. String fields take the variable's
//! value verbatim, including the empty string. Integer fields are parsed as
//! base-10 `i64`; the lenient loader treats a parse failure exactly like an
//! absent variable, while the strict loader reports it.

use crate::config::{Config, DatabaseConfig, defaults, keys};
use crate::error::ConfigError;
use crate::source::{EnvSource, ProcessEnv};

/// Loads configuration from the process environment. Never fails.
pub fn load_config() -> Config {
    Config::from_env()
}

fn string_or(env: &impl EnvSource, key: &str, fallback: &str) -> String {
    env.get(key).unwrap_or_else(|| fallback.to_string())
}

/// `None` when the variable is unset, otherwise the parse outcome.
fn parse_int(env: &impl EnvSource, key: &'static str) -> Option<Result<i64, ConfigError>> {
    let value = env.get(key)?;
    Some(
        value
            .parse::<i64>()
            .map_err(|source| ConfigError::InvalidInteger { key, value, source }),
    )
}

fn int_or(env: &impl EnvSource, key: &'static str, fallback: i64) -> i64 {
    match parse_int(env, key) {
        Some(Ok(v)) => v,
        _ => fallback,
    }
}

fn try_int_or(env: &impl EnvSource, key: &'static str, fallback: i64) -> Result<i64, ConfigError> {
    parse_int(env, key).unwrap_or(Ok(fallback))
}

/// Integer keys in field order.
const INTEGER_KEYS: [&str; 6] = [
    keys::DB_MAX_CONNECTIONS,
    keys::DB_MIN_CONNECTIONS,
    keys::DB_MAX_CONN_LIFETIME,
    keys::DB_MAX_CONN_IDLE_TIME,
    keys::DB_HEALTH_CHECK_PERIOD,
    keys::DB_CONNECT_TIMEOUT,
];

impl Config {
    /// Loads configuration from the process environment. Never fails.
    pub fn from_env() -> Self {
        Self::from_source(&ProcessEnv)
    }

    /// Loads configuration from `env`, substituting defaults for absent or
    /// malformed values. Never fails.
    pub fn from_source(env: &impl EnvSource) -> Self {
        Self {
            public_host: string_or(env, keys::PUBLIC_HOST, defaults::PUBLIC_HOST),
            port: string_or(env, keys::PORT, defaults::PORT),
            database_url: string_or(env, keys::DATABASE_URL, defaults::DATABASE_URL),
            database: DatabaseConfig::from_source(env),
        }
    }

    /// Strict variant of [`Config::from_env`].
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::try_from_source(&ProcessEnv)
    }

    /// Like [`Config::from_source`], but a present integer variable that
    /// does not parse is an error. Absent variables still use defaults.
    pub fn try_from_source(env: &impl EnvSource) -> Result<Self, ConfigError> {
        Ok(Self {
            public_host: string_or(env, keys::PUBLIC_HOST, defaults::PUBLIC_HOST),
            port: string_or(env, keys::PORT, defaults::PORT),
            database_url: string_or(env, keys::DATABASE_URL, defaults::DATABASE_URL),
            database: DatabaseConfig::try_from_source(env)?,
        })
    }

    /// Every integer variable in `env` that is set but not parseable.
    pub fn invalid_entries(env: &impl EnvSource) -> Vec<ConfigError> {
        INTEGER_KEYS
            .into_iter()
            .filter_map(|key| parse_int(env, key).and_then(Result::err))
            .collect()
    }
}

impl DatabaseConfig {
    /// Resolves pool settings from `env`, defaulting absent or malformed values.
    pub fn from_source(env: &impl EnvSource) -> Self {
        Self {
            max_connections: int_or(env, keys::DB_MAX_CONNECTIONS, defaults::MAX_CONNECTIONS),
            min_connections: int_or(env, keys::DB_MIN_CONNECTIONS, defaults::MIN_CONNECTIONS),
            max_conn_lifetime: int_or(
                env,
                keys::DB_MAX_CONN_LIFETIME,
                defaults::MAX_CONN_LIFETIME,
            ),
            max_conn_idle_time: int_or(
                env,
                keys::DB_MAX_CONN_IDLE_TIME,
                defaults::MAX_CONN_IDLE_TIME,
            ),
            health_check_period: int_or(
                env,
                keys::DB_HEALTH_CHECK_PERIOD,
                defaults::HEALTH_CHECK_PERIOD,
            ),
            connect_timeout: int_or(env, keys::DB_CONNECT_TIMEOUT, defaults::CONNECT_TIMEOUT),
        }
    }

    /// Resolves pool settings from `env`, rejecting malformed integers.
    pub fn try_from_source(env: &impl EnvSource) -> Result<Self, ConfigError> {
        Ok(Self {
            max_connections: try_int_or(env, keys::DB_MAX_CONNECTIONS, defaults::MAX_CONNECTIONS)?,
            min_connections: try_int_or(env, keys::DB_MIN_CONNECTIONS, defaults::MIN_CONNECTIONS)?,
            max_conn_lifetime: try_int_or(
                env,
                keys::DB_MAX_CONN_LIFETIME,
                defaults::MAX_CONN_LIFETIME,
            )?,
            max_conn_idle_time: try_int_or(
                env,
                keys::DB_MAX_CONN_IDLE_TIME,
                defaults::MAX_CONN_IDLE_TIME,
            )?,
            health_check_period: try_int_or(
                env,
                keys::DB_HEALTH_CHECK_PERIOD,
                defaults::HEALTH_CHECK_PERIOD,
            )?,
            connect_timeout: try_int_or(env, keys::DB_CONNECT_TIMEOUT, defaults::CONNECT_TIMEOUT)?,
        })
    }
}
