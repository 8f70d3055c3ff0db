use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pfx_core::error::CoreError;
use pfx_core::export::{EncodeError, ExportError};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`ExportError`] for export
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `pfx_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A frame decoding or encoding failure from the export pipeline.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route or resource matches the request.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The path exists but does not accept the request method.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timeout: {0}")]
    RequestTimeout(String),

    /// The request body exceeded the configured limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Export errors ---
            AppError::Export(ExportError::Decode(err)) => {
                (StatusCode::BAD_REQUEST, "DECODE_ERROR", err.to_string())
            }
            AppError::Export(ExportError::Encode(err)) => classify_encode_error(err),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::MethodNotAllowed(msg) => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                msg.clone(),
            ),
            AppError::RequestTimeout(msg) => {
                (StatusCode::REQUEST_TIMEOUT, "REQUEST_TIMEOUT", msg.clone())
            }
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify an encoder failure into an HTTP status, error code, and message.
///
/// The encoder's own diagnostics are returned to the client so a broken
/// frame sequence can be fixed; local I/O details (paths) are not.
fn classify_encode_error(err: &EncodeError) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %err, "Video export failed");
    let message = match err {
        EncodeError::Failed { stderr, .. } if !stderr.is_empty() => {
            format!("Video encoding failed: {stderr}")
        }
        EncodeError::Failed {
            exit_code: Some(code),
            ..
        } => format!("Video encoding failed (exit code {code})"),
        EncodeError::Failed {
            exit_code: None, ..
        } => "Video encoding failed (terminated by signal)".to_string(),
        EncodeError::Timeout { .. } => err.to_string(),
        EncodeError::Spawn(_) => "Video encoder is not available".to_string(),
        EncodeError::MissingOutput(_) | EncodeError::Io(_) => "Video encoding failed".to_string(),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, "ENCODE_ERROR", message)
}

/// SQLite extended result code for a violated CHECK constraint.
const SQLITE_CONSTRAINT_CHECK: &str = "275";

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - CHECK constraint violations map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some(SQLITE_CONSTRAINT_CHECK) =>
        {
            (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Value violates a table constraint".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
