use std::sync::Arc;

use pfx_core::export::VideoEncoder;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via axum's `State` extractor.
///
/// Must be `Clone` because axum clones it for each request.
/// Inner fields use `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool.
    pub pool: pfx_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Encoder used by the export endpoint.
    pub encoder: Arc<dyn VideoEncoder>,
}
