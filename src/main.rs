use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use taskboard_api::config::{AppConfig, CliOverrides, StoreBackend};
use taskboard_api::database::{DatabaseManager, MemoryStore, PgStore, TaskStore, UserStore};
use taskboard_api::{app, AppState};

/// Task board API server
#[derive(Debug, Parser)]
#[command(name = "taskboard-api", version, about)]
struct Args {
    /// Port to listen on (overrides TASKBOARD_PORT / PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Storage backend: postgres or memory (overrides TASKBOARD_STORE)
    #[arg(short, long)]
    store: Option<StoreBackend>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("taskboard_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let config = AppConfig::from_env_with(CliOverrides {
        port: args.port,
        store: args.store,
    })
    .context("invalid configuration")?;

    tracing::info!(
        "Starting Task Board API in {:?} mode with {:?} store",
        config.environment,
        config.server.store
    );

    let (users, tasks, pool) = open_store(&config).await?;
    let port = config.server.port;
    let state = AppState::new(config, users, tasks);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Task Board API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(pool) = pool {
        DatabaseManager::close(pool).await;
    }

    Ok(())
}

async fn open_store(
    config: &AppConfig,
) -> anyhow::Result<(Arc<dyn UserStore>, Arc<dyn TaskStore>, Option<PgPool>)> {
    match config.server.store {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on shutdown");
            let store = Arc::new(MemoryStore::new());
            let users: Arc<dyn UserStore> = store.clone();
            Ok((users, store, None))
        }
        StoreBackend::Postgres => {
            let url = config
                .database
                .url
                .as_deref()
                .context("DATABASE_URL is required for the postgres store")?;
            let pool = DatabaseManager::connect(url, &config.database)
                .await
                .context("failed to connect to database")?;
            DatabaseManager::ensure_schema(&pool)
                .await
                .context("failed to prepare database schema")?;

            let store = Arc::new(PgStore::new(pool.clone()));
            let users: Arc<dyn UserStore> = store.clone();
            Ok((users, store, Some(pool)))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
