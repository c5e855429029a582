//! Repository factory for dependency injection.
//!
//! Builds the `Arc<dyn PetRepository>` handed to the service layer. The
//! repository is constructed once at startup and passed down explicitly;
//! there is no process-wide instance.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::info;

use super::config::PostgresConfig;
use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
use super::repositories::PostgresRepository;
use super::repository::{PetRepository, RepositoryError, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Postgres + Diesel implementation
    Postgres,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("postgres", "pg", "local").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Without it the service runs against
    /// Postgres; the in-memory store is only used when asked for by name.
    ///
    /// # Errors
    /// An unrecognized value is a configuration error.
    pub fn from_env() -> RepositoryResult<Self> {
        match std::env::var("REPOSITORY_TYPE") {
            Ok(val) => val.parse().map_err(RepositoryError::configuration),
            Err(_) => Ok(Self::Postgres),
        }
    }
}

/// Repository factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `postgres_config` - Database configuration (required for Postgres)
    pub async fn create(
        repo_type: RepositoryType,
        postgres_config: Option<&PostgresConfig>,
    ) -> RepositoryResult<Arc<dyn PetRepository>> {
        match repo_type {
            RepositoryType::Postgres => {
                let config = postgres_config.ok_or_else(|| {
                    RepositoryError::configuration(
                        "Postgres repository requires PostgresConfig",
                    )
                })?;
                Self::create_postgres(config).await
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a Postgres repository.
    #[cfg(feature = "postgres-repo")]
    pub async fn create_postgres(
        config: &PostgresConfig,
    ) -> RepositoryResult<Arc<dyn PetRepository>> {
        let config = config.clone();
        // Pool construction blocks while it opens the initial connections.
        let repo = tokio::task::spawn_blocking(move || PostgresRepository::new(config))
            .await
            .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))??;
        info!("Postgres connection pool ready");
        Ok(Arc::new(repo))
    }

    /// Create a Postgres repository when the feature is disabled.
    #[cfg(not(feature = "postgres-repo"))]
    pub async fn create_postgres(
        _config: &PostgresConfig,
    ) -> RepositoryResult<Arc<dyn PetRepository>> {
        Err(RepositoryError::configuration(
            "Postgres repository feature not enabled",
        ))
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn PetRepository> {
        info!("Using in-memory local repository");
        Arc::new(LocalRepository::new())
    }

    /// Create repository from environment configuration.
    ///
    /// For Postgres a missing credential is a configuration error.
    pub async fn from_env() -> RepositoryResult<Arc<dyn PetRepository>> {
        match RepositoryType::from_env()? {
            RepositoryType::Postgres => {
                let config = PostgresConfig::from_env().map_err(RepositoryError::configuration)?;
                Self::create_postgres(&config).await
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create repository from a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn PetRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config).await
    }

    /// Create repository from a RepositoryConfig instance.
    pub async fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn PetRepository>> {
        let repo_type = config.repository_type()?;
        let pg_config = config.to_postgres_config()?;
        Self::create(repo_type, pg_config.as_ref()).await
    }
}
