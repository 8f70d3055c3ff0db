//! Route definitions for the preset gallery, mounted at `/api/presets`.
//!
//! ```text
//! GET    /               list_presets
//! POST   /               create_preset
//! POST   /{id}/like      like_preset
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::presets;
use crate::state::AppState;

/// Preset routes -- mounted at `/api/presets`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(presets::list_presets).post(presets::create_preset))
        .route("/{id}/like", post(presets::like_preset))
}
