//! Database module for pet record storage.
//!
//! This module provides abstractions for database operations via the Repository pattern,
//! allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services::PetService)                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                │
//! ┌───▼──────────────────┐  ┌──────────▼──────────────┐
//! │ Postgres Repository  │  │ Local Repository        │
//! │ (diesel + r2d2)      │  │ (in-memory)             │
//! └──────────────────────┘  └─────────────────────────┘
//! ```
//!
//! The module includes:
//! - `repository`: Trait definition and error types
//! - `repositories::postgres`: Postgres implementation with Diesel ORM
//! - `repositories::local`: In-memory implementation for unit testing and local development
//! - `search`: Composable search criteria
//! - `seed`: One-time bulk load of the pets table
//! - `factory`: Factory for creating repository instances
//!
//! # Usage
//!
//! ```no_run
//! use pets_backend::db::{load_pets_table, RepositoryFactory};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = RepositoryFactory::from_env().await?;
//! let inserted = load_pets_table(repo.as_ref(), "seeds/breeds.csv").await?;
//! println!("Seeded {} pets", inserted);
//! # Ok(())
//! # }
//! ```

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod config;
pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod search;
pub mod seed;

pub use config::PostgresConfig;
pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{ErrorContext, PetRepository, RepositoryError, RepositoryResult};
pub use search::{PetSearch, SearchCriterion};
pub use seed::load_pets_table;
