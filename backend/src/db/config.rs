//! Postgres connection configuration and environment variable handling.

use std::env;

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    /// Database connection URL (carries the credential)
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of idle connections kept in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` or `PG_DATABASE_URL`: full connection string. When
    ///   neither is set the URL is assembled from:
    ///   - `POSTGRES_PASSWORD` (required): the store credential
    ///   - `POSTGRES_USER` (default: `postgres`)
    ///   - `POSTGRES_HOST` (default: `localhost`)
    ///   - `POSTGRES_PORT` (default: 5432)
    ///   - `POSTGRES_DB` (default: `core`)
    /// - `PG_POOL_MAX`: Maximum pool size (default: 10)
    /// - `PG_POOL_MIN`: Minimum pool size (default: 1)
    /// - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
    /// - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
    ///
    /// # Errors
    /// Returns an error if no URL is given and the password is not set.
    pub fn from_env() -> Result<Self, String> {
        let database_url = match env::var("DATABASE_URL").or_else(|_| env::var("PG_DATABASE_URL"))
        {
            Ok(url) => url,
            Err(_) => Self::url_from_parts()?,
        };

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
        })
    }

    fn url_from_parts() -> Result<String, String> {
        let password = env::var("POSTGRES_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                "POSTGRES_PASSWORD is not set (or provide DATABASE_URL)".to_string()
            })?;
        let user = env::var("POSTGRES_USER").unwrap_or_else(|_| "postgres".to_string());
        let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port: u16 = env::var("POSTGRES_PORT")
            .unwrap_or_else(|_| "5432".to_string())
            .parse()
            .map_err(|_| "POSTGRES_PORT must be a valid port number".to_string())?;
        let database = env::var("POSTGRES_DB").unwrap_or_else(|_| "core".to_string());

        Ok(format!(
            "postgres://{}:{}@{}:{}/{}",
            user, password, host, port, database
        ))
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
