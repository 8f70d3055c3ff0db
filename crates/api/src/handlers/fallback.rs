use axum::http::{Method, Uri};

use crate::error::AppError;

/// Catch-all for unmatched routes: a JSON 404 instead of an empty body.
pub async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "No route matched");
    AppError::NotFound(format!("No route for {}", uri.path()))
}

/// Known path, wrong method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    tracing::debug!(%method, path = %uri.path(), "Method not allowed");
    AppError::MethodNotAllowed(format!("{method} is not allowed on {}", uri.path()))
}
