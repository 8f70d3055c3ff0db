//! Frame-sequence to video export.
//!
//! An export takes the ordered data-URL frames posted by the editor, writes
//! them as a numbered image sequence into a private temporary workspace,
//! hands the workspace to a [`VideoEncoder`] and returns the produced file
//! together with the workspace guard. Dropping the returned
//! [`ExportedVideo`] removes every file the export created.

pub mod encoder;
pub mod format;
pub mod frames;
pub mod workspace;

pub use encoder::{EncodeError, EncodeJob, VideoEncoder};
pub use format::ExportFormat;
pub use frames::{decode_frame, decode_frames, DecodeError};
pub use workspace::{run_export, ExportedVideo, ExportLimits};

use crate::error::CoreError;

/// Frame rate used when the request does not specify one.
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// Format requested when the client does not specify one.
pub const DEFAULT_FORMAT: &str = "mp4";

/// Any failure of an export after request validation.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Validate the shape of an export request before any work is done.
pub fn validate_export_request(
    frame_count: usize,
    frame_rate: u32,
    limits: &ExportLimits,
) -> Result<(), CoreError> {
    if frame_count == 0 {
        return Err(CoreError::Validation(
            "frames must contain at least one frame".to_string(),
        ));
    }
    if frame_count > limits.max_frames {
        return Err(CoreError::Validation(format!(
            "Too many frames: {frame_count} (max {})",
            limits.max_frames
        )));
    }
    if frame_rate == 0 {
        return Err(CoreError::Validation(
            "frameRate must be a positive integer".to_string(),
        ));
    }
    Ok(())
}
