//! Scoped export workspaces.
//!
//! Each export gets its own directory under the configured root. The
//! directory is owned by a [`TempDir`] guard: on failure it is dropped
//! before the error is returned, on success it travels inside
//! [`ExportedVideo`] so the caller decides when the files go away (after the
//! response body has been streamed).

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::encoder::{frame_file_name, EncodeError, EncodeJob, VideoEncoder};
use super::format::ExportFormat;
use super::frames::decode_frames;
use super::ExportError;

/// Prefix of every workspace directory name.
pub const WORKSPACE_PREFIX: &str = "pfx-export-";

/// Where exports run and how large they may be.
#[derive(Debug, Clone)]
pub struct ExportLimits {
    /// Parent directory for per-request workspaces.
    pub root: PathBuf,
    /// Maximum number of frames accepted in one request.
    pub max_frames: usize,
}

/// A finished export: the video file plus the workspace that contains it.
#[derive(Debug)]
pub struct ExportedVideo {
    workspace: TempDir,
    path: PathBuf,
    format: ExportFormat,
}

impl ExportedVideo {
    /// Path of the produced video file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Split into the workspace guard and the file path. The file is only
    /// valid while the guard is alive.
    pub fn into_parts(self) -> (TempDir, PathBuf, ExportFormat) {
        (self.workspace, self.path, self.format)
    }
}

/// Decode `frames`, materialize them in a fresh workspace under `root` and
/// run `encoder` over them once.
pub async fn run_export<S: AsRef<str>>(
    encoder: &dyn VideoEncoder,
    root: &Path,
    frames: &[S],
    format: ExportFormat,
    frame_rate: u32,
) -> Result<ExportedVideo, ExportError> {
    // Decode everything up front so a bad frame never touches the disk.
    let images = decode_frames(frames)?;

    tokio::fs::create_dir_all(root)
        .await
        .map_err(EncodeError::Io)?;
    let workspace = tempfile::Builder::new()
        .prefix(WORKSPACE_PREFIX)
        .tempdir_in(root)
        .map_err(EncodeError::Io)?;

    for (index, bytes) in images.iter().enumerate() {
        let frame_path = workspace.path().join(frame_file_name(index));
        tokio::fs::write(&frame_path, bytes)
            .await
            .map_err(EncodeError::Io)?;
    }
    tracing::debug!(
        frames = images.len(),
        workspace = %workspace.path().display(),
        "Export frames written"
    );

    let job = EncodeJob {
        workspace: workspace.path(),
        frame_count: images.len(),
        frame_rate,
        format,
    };
    let path = encoder.encode(&job).await?;

    // The file must exist and be covered by the workspace guard.
    if !path.starts_with(workspace.path()) || !tokio::fs::try_exists(&path).await.unwrap_or(false)
    {
        return Err(EncodeError::MissingOutput(path).into());
    }

    Ok(ExportedVideo {
        workspace,
        path,
        format,
    })
}
