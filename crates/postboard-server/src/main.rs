//! API server binary for the Postboard service.
//!
//! Wires together configuration, storage, the readiness gate and the
//! HTTP router, then serves until a shutdown signal arrives.
//!
//! # Startup Sequence
//!
//! 1. Load `.env` and initialize structured logging (tracing)
//! 2. Load configuration from the environment
//! 3. Build storage (lazy `PostgreSQL` pools or in-memory tables)
//! 4. Probe primary and replica until both answer (fatal on exhaustion)
//! 5. Bootstrap the schema on the primary
//! 6. Optionally seed random users, posts and comments
//! 7. Serve the REST API

mod config;
mod error;

use std::sync::Arc;

use postboard_api::AppState;
use postboard_db::{MemoryStore, PostgresCluster, ReplicationMode, Storage};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, BackendConfig};
use crate::error::AppError;

/// Application entry point for the API server.
///
/// # Errors
///
/// Returns an error if configuration is invalid, storage never becomes
/// ready, or the server cannot bind.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is normal in container deployments.
    let dotenv_path = dotenvy::dotenv().ok();

    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!(dotenv = ?dotenv_path, "postboard-server starting");

    if let Err(e) = run().await {
        tracing::error!(error = %e, "postboard-server exiting");
        return Err(e.into());
    }

    info!("postboard-server shutdown complete");
    Ok(())
}

async fn run() -> Result<(), AppError> {
    // 2. Load configuration.
    let config = AppConfig::from_env()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        max_attempts = config.readiness.max_attempts,
        retry_delay_secs = config.readiness.delay.as_secs(),
        seed_users = config.seed.users,
        seed_posts = config.seed.posts,
        seed_comments = config.seed.comments,
        "Configuration loaded"
    );

    // 3. Build storage.
    let storage = match &config.backend {
        BackendConfig::Postgres { primary, replica } => {
            Storage::Postgres(PostgresCluster::connect_lazy(primary, replica))
        }
        BackendConfig::Memory => Storage::Memory(MemoryStore::new(ReplicationMode::Synchronous)),
    };
    info!(backend = storage.name(), "Storage configured");

    // 4. Readiness gate.
    postboard_db::wait_until_ready(&storage, config.readiness).await?;

    // 5. Schema.
    if let Storage::Postgres(cluster) = &storage {
        cluster.primary().bootstrap_schema().await?;
    }

    // 6. Seed.
    if !config.seed.is_empty() {
        let mut rng = rand::rng();
        postboard_db::seed(&storage, config.seed, &mut rng).await?;
    }

    // 7. Serve.
    let state = Arc::new(AppState::new(storage.clone()));
    let served = postboard_api::start_server(&config.server, state).await;

    if let Storage::Postgres(cluster) = &storage {
        cluster.close().await;
    }

    served.map_err(AppError::from)
}
