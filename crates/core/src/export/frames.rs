//! Data-URL frame decoding.
//!
//! Frames arrive as `data:image/png;base64,<payload>`. Only the payload after
//! the first comma matters; the prefix is not inspected.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// A frame that could not be turned into image bytes.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("frame {index} is not a data URL (missing ',' separator)")]
    MissingSeparator { index: usize },

    #[error("frame {index} has an invalid base64 payload: {source}")]
    InvalidBase64 {
        index: usize,
        #[source]
        source: base64::DecodeError,
    },
}

impl DecodeError {
    /// Position of the offending frame in the request.
    pub fn frame_index(&self) -> usize {
        match self {
            Self::MissingSeparator { index } | Self::InvalidBase64 { index, .. } => *index,
        }
    }
}

/// Decode one data-URL frame into raw image bytes.
pub fn decode_frame(index: usize, data_url: &str) -> Result<Vec<u8>, DecodeError> {
    let (_, payload) = data_url
        .split_once(',')
        .ok_or(DecodeError::MissingSeparator { index })?;
    STANDARD
        .decode(payload.trim())
        .map_err(|source| DecodeError::InvalidBase64 { index, source })
}

/// Decode every frame, stopping at the first malformed one.
pub fn decode_frames<S: AsRef<str>>(frames: &[S]) -> Result<Vec<Vec<u8>>, DecodeError> {
    frames
        .iter()
        .enumerate()
        .map(|(index, frame)| decode_frame(index, frame.as_ref()))
        .collect()
}
