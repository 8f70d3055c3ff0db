use axum::routing::post;
use axum::Router;

use crate::handlers::export;
use crate::state::AppState;

/// Mount the video export route (root-level, path kept from the editor's
/// client contract).
pub fn router() -> Router<AppState> {
    Router::new().route("/export-video", post(export::export_video))
}
