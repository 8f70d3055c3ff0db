//! The video encoder capability.
//!
//! The export pipeline only needs one operation from an encoder: turn the
//! numbered frame sequence in a workspace into a single video file. The
//! production implementation shells out to `ffmpeg`
//! ([`FfmpegEncoder`](crate::ffmpeg::FfmpegEncoder)); tests substitute fakes.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::format::ExportFormat;

/// printf-style pattern of frame files inside a workspace.
pub const FRAME_PATTERN: &str = "frame_%06d.png";

/// File name of frame `index` inside a workspace (matches [`FRAME_PATTERN`]).
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{index:06}.png")
}

/// Everything an encoder needs to produce one video.
#[derive(Debug, Clone)]
pub struct EncodeJob<'a> {
    /// Directory holding the numbered frame files.
    pub workspace: &'a Path,
    /// Number of frames written (`frame_000000.png` .. `frame_{n-1}`).
    pub frame_count: usize,
    /// Input frames per second.
    pub frame_rate: u32,
    /// Output profile.
    pub format: ExportFormat,
}

impl EncodeJob<'_> {
    /// Numbered-sequence input pattern, e.g. `/tmp/pfx-export-x/frame_%06d.png`.
    pub fn input_pattern(&self) -> PathBuf {
        self.workspace.join(FRAME_PATTERN)
    }

    /// Fixed output location inside the workspace.
    pub fn output_path(&self) -> PathBuf {
        self.workspace
            .join(format!("output.{}", self.format.extension()))
    }
}

/// Encoder failure, or an I/O failure while preparing or reading its input.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("failed to start encoder: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("encoder failed (exit code {exit_code:?}): {stderr}")]
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("encoder timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("encoder reported success but produced no output at {0}")]
    MissingOutput(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns a numbered image sequence into a video file.
#[async_trait]
pub trait VideoEncoder: Send + Sync {
    /// Encode the frames described by `job`, returning the path of the
    /// produced file (normally [`EncodeJob::output_path`]).
    async fn encode(&self, job: &EncodeJob<'_>) -> Result<PathBuf, EncodeError>;
}
