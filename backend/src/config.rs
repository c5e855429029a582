//! Server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Settings for the HTTP server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seed file loaded into an empty pets table at startup
    pub seed_file: PathBuf,
    /// Optional TOML file selecting the repository backend
    pub repository_config: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            seed_file: PathBuf::from("seeds/breeds.csv"),
            repository_config: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// # Environment Variables
    /// - `HOST`: bind host (default: `0.0.0.0`)
    /// - `PORT`: bind port (default: 5000)
    /// - `SEED_FILE`: seed file path (default: `seeds/breeds.csv`)
    /// - `REPOSITORY_CONFIG`: repository TOML file (default: unset, use env)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got '{}'", raw))?,
            Err(_) => defaults.port,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            seed_file: env::var("SEED_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.seed_file),
            repository_config: env::var("REPOSITORY_CONFIG").ok().map(PathBuf::from),
        })
    }

    /// `host:port` string to bind. The host may be a name such as
    /// `localhost`; resolution happens at bind time.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_address() {
        assert_eq!(ServerConfig::default().bind_address(), "0.0.0.0:5000");
    }

    #[tokio::test]
    async fn test_host_name_binds() {
        let config = ServerConfig {
            host: "localhost".to_string(),
            port: 0,
            ..Default::default()
        };
        let listener = tokio::net::TcpListener::bind(config.bind_address())
            .await
            .unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }
}
