//! Handler for turning rendered frames into a downloadable video.

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::Response;
use futures::Stream;
use serde::Deserialize;
use tempfile::TempDir;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use pfx_core::error::CoreError;
use pfx_core::export::{
    self, EncodeError, ExportError, ExportFormat, DEFAULT_FORMAT, DEFAULT_FRAME_RATE,
};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// Request body of `POST /export-video`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportVideoRequest {
    /// Ordered `data:<mime>;base64,<payload>` frames.
    pub frames: Option<Vec<String>>,
    pub format: Option<String>,
    pub frame_rate: Option<u32>,
}

// ---------------------------------------------------------------------------
// POST /export-video
// ---------------------------------------------------------------------------

/// Encode the posted frames and stream the video back as an attachment.
///
/// The export workspace is moved into the body stream, so the frames and
/// the video are removed once the response has been sent (or the client
/// went away).
pub async fn export_video(
    State(state): State<AppState>,
    AppJson(input): AppJson<ExportVideoRequest>,
) -> AppResult<Response> {
    let frames = input
        .frames
        .ok_or_else(|| CoreError::Validation("frames is required".to_string()))?;
    let frame_rate = input.frame_rate.unwrap_or(DEFAULT_FRAME_RATE);
    let limits = state.config.export.limits();
    export::validate_export_request(frames.len(), frame_rate, &limits)?;

    let format = ExportFormat::from_requested(input.format.as_deref().unwrap_or(DEFAULT_FORMAT));

    tracing::info!(
        frames = frames.len(),
        frame_rate,
        format = format.extension(),
        "Video export requested"
    );

    let video = export::run_export(
        state.encoder.as_ref(),
        &limits.root,
        &frames,
        format,
        frame_rate,
    )
    .await
    .inspect_err(|err| {
        if let ExportError::Decode(decode) = err {
            tracing::warn!(
                frame = decode.frame_index(),
                error = %decode,
                "Rejected malformed frame"
            );
        }
    })?;
    drop(frames);

    let (workspace, path, format) = video.into_parts();
    let file = File::open(&path).await.map_err(io_failure)?;
    let size = file.metadata().await.map_err(io_failure)?.len();
    let stream = WorkspaceStream {
        inner: ReaderStream::new(file),
        _workspace: workspace,
    };

    tracing::info!(bytes = size, format = format.extension(), "Video export ready");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, format.content_type())
        .header(header::CONTENT_LENGTH, size.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", format.download_name()),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::InternalError(e.to_string()))
}

fn io_failure(err: std::io::Error) -> AppError {
    AppError::Export(ExportError::Encode(EncodeError::Io(err)))
}

/// The video file's byte stream, holding the workspace guard until the body
/// is finished or dropped.
struct WorkspaceStream {
    inner: ReaderStream<File>,
    _workspace: TempDir,
}

impl Stream for WorkspaceStream {
    type Item = std::io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
