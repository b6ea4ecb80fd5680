use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::DatabaseConfig;

use super::store::StoreError;

/// Idempotent schema bootstrap, run once at startup.
pub(crate) const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id UUID PRIMARY KEY,
        seq BIGSERIAL NOT NULL,
        title VARCHAR(200) NOT NULL,
        status TEXT NOT NULL DEFAULT 'TODO' CHECK (status IN ('TODO', 'IN_PROGRESS', 'DONE')),
        owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    // Tables created before the insertion sequence existed
    "ALTER TABLE tasks ADD COLUMN IF NOT EXISTS seq BIGSERIAL NOT NULL",
    "CREATE INDEX IF NOT EXISTS tasks_owner_created_idx ON tasks (owner_id, created_at DESC, seq DESC)",
];

/// Owns the Postgres connection pool shared by all requests.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect a pool sized and timed from configuration.
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<PgPool, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool (max {} connections)", config.max_connections);
        Ok(pool)
    }

    pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(pool).await?;
        }
        info!("Database schema is up to date");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    pub async fn close(pool: PgPool) {
        pool.close().await;
        info!("Closed database pool");
    }
}
