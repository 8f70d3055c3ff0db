pub mod export;
pub mod health;
pub mod presets;
pub mod static_files;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                          index.html
/// /static/*                  front-end assets
/// /health                    service + database health
///
/// /api/presets               list (GET), create (POST)
/// /api/presets/{id}/like     like (POST)
///
/// /export-video              frames -> video download (POST)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .nest("/api/presets", presets::router())
        .merge(export::router())
}
