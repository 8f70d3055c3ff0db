//! Repository for the `particle_presets` table.

use pfx_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::preset::{NewPreset, Preset};

const COLUMNS: &str = "id, name, description, config, likes, created_at";

/// Provides list/create/like operations for presets.
///
/// Writes run inside a transaction that is committed only on success; an
/// early return drops the transaction, which rolls it back.
pub struct PresetRepo;

impl PresetRepo {
    /// Insert a new preset with zero likes, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &NewPreset) -> Result<Preset, sqlx::Error> {
        let query = format!(
            "INSERT INTO particle_presets \
                (name, description, config, likes, created_at) \
             VALUES (?, ?, ?, 0, ?) \
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let preset = sqlx::query_as::<_, Preset>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.config.as_str())
            .bind(chrono::Utc::now())
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(preset)
    }

    /// Find a preset by ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Preset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM particle_presets WHERE id = ?");
        sqlx::query_as::<_, Preset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every preset, most liked first; ties keep insertion order.
    pub async fn list_by_likes(pool: &SqlitePool) -> Result<Vec<Preset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM particle_presets \
             ORDER BY likes DESC, id ASC"
        );
        sqlx::query_as::<_, Preset>(&query).fetch_all(pool).await
    }

    /// Atomically add one like, returning the new count.
    ///
    /// Returns `None` (and leaves the table untouched) if no preset has `id`.
    /// The read-modify-write happens in a single statement, so concurrent
    /// likes on the same row are serialized by the engine's write lock.
    pub async fn like(pool: &SqlitePool, id: DbId) -> Result<Option<i64>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let likes: Option<i64> = sqlx::query_scalar(
            "UPDATE particle_presets SET likes = likes + 1 WHERE id = ? RETURNING likes",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if likes.is_some() {
            tx.commit().await?;
        }
        Ok(likes)
    }

    /// Total number of stored presets.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM particle_presets")
            .fetch_one(pool)
            .await
    }
}
