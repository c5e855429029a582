//! Pets HTTP Server Binary
//!
//! This is the main entry point for the pets REST API server.
//! It builds the repository, seeds an empty pets table, sets up the HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with PostgreSQL repository (default)
//! POSTGRES_PASSWORD=secret POSTGRES_HOST=localhost \
//!   cargo run --bin pets-server --features "postgres-repo"
//!
//! # Run with local (in-memory) repository
//! REPOSITORY_TYPE=local cargo run --bin pets-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 5000)
//! - `SEED_FILE`: Seed file for an empty table (default: seeds/breeds.csv)
//! - `REPOSITORY_CONFIG`: Optional repository TOML file
//! - `REPOSITORY_TYPE`: `postgres` (default) or `local` when no config file is given
//! - `DATABASE_URL` / `POSTGRES_*`: Postgres connection settings
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use pets_backend::config::ServerConfig;
use pets_backend::db::{load_pets_table, PetRepository, RepositoryFactory};
use pets_backend::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting pets HTTP server");

    let config = ServerConfig::from_env()?;
    let repository = build_repository(&config).await?;

    if !repository
        .health_check()
        .await
        .context("Database ping failed")?
    {
        anyhow::bail!("Database is not reachable");
    }
    info!("Repository initialized successfully");

    let inserted = load_pets_table(repository.as_ref(), &config.seed_file)
        .await
        .with_context(|| format!("Failed to load seed file {}", config.seed_file.display()))?;
    if inserted > 0 {
        info!("Inserted {} pets from seed file", inserted);
    }

    let app = create_router(AppState::from_repository(repository));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn build_repository(config: &ServerConfig) -> anyhow::Result<Arc<dyn PetRepository>> {
    let repository = match &config.repository_config {
        Some(path) => RepositoryFactory::from_config_file(path).await,
        None => RepositoryFactory::from_env().await,
    };
    repository.context("Failed to initialize repository")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
