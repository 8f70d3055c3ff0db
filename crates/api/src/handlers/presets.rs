//! Handlers for the particle preset gallery.
//!
//! Provides endpoints for listing presets (most liked first), saving a new
//! preset from the editor and liking an existing one.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use pfx_core::error::CoreError;
use pfx_core::types::DbId;
use pfx_db::models::preset::{CreatePreset, PresetLikes};
use pfx_db::repositories::PresetRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /api/presets
// ---------------------------------------------------------------------------

/// List every preset ordered by likes descending.
pub async fn list_presets(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let presets = PresetRepo::list_by_likes(&state.pool).await?;
    tracing::debug!(count = presets.len(), "Listed presets");
    Ok(Json(presets))
}

// ---------------------------------------------------------------------------
// POST /api/presets
// ---------------------------------------------------------------------------

/// Save a new preset. Responds 201 with the stored record.
pub async fn create_preset(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreatePreset>,
) -> AppResult<impl IntoResponse> {
    let new_preset = input.validate()?;
    let preset = PresetRepo::create(&state.pool, &new_preset).await?;

    tracing::info!(id = preset.id, name = %preset.name, "Preset created");

    Ok((StatusCode::CREATED, Json(preset)))
}

// ---------------------------------------------------------------------------
// POST /api/presets/{id}/like
// ---------------------------------------------------------------------------

/// Add one like to a preset and return the new count.
pub async fn like_preset(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<PresetLikes>> {
    let likes = PresetRepo::like(&state.pool, id).await?.ok_or(AppError::Core(
        CoreError::NotFound {
            entity: "Preset",
            id,
        },
    ))?;

    tracing::info!(id, likes, "Preset liked");

    Ok(Json(PresetLikes { likes }))
}
