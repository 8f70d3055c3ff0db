//! Storage layer: connection pool, schema bootstrap, models and repositories.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Connections are recycled after this long to avoid stale handles.
const MAX_CONNECTION_LIFETIME: Duration = Duration::from_secs(300);

/// How long a writer waits for the database lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// The single table backing the preset store. Idempotent.
const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS particle_presets (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL CHECK (length(name) <= 100),
    description TEXT    NOT NULL DEFAULT '' CHECK (length(description) <= 500),
    config      TEXT    NOT NULL,
    created_at  TEXT    NOT NULL,
    likes       INTEGER NOT NULL DEFAULT 0 CHECK (likes >= 0)
);
CREATE INDEX IF NOT EXISTS idx_particle_presets_likes
    ON particle_presets (likes DESC, id ASC);
";

/// Create a connection pool from a database URL.
///
/// The database file is created if it does not exist yet.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(8)
        .max_lifetime(MAX_CONNECTION_LIFETIME)
        .idle_timeout(Duration::from_secs(60))
        .test_before_acquire(true)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Create the preset table and its index if they are missing.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    tracing::debug!("Preset schema ensured");
    Ok(())
}
