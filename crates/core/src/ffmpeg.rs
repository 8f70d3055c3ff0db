//! FFmpeg-backed [`VideoEncoder`].
//!
//! Runs `ffmpeg` once per export, non-interactively, reading the numbered
//! frame sequence from the workspace and writing `output.<ext>` next to it.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::export::{EncodeError, EncodeJob, VideoEncoder};

/// Maximum number of stderr bytes carried in an [`EncodeError::Failed`].
///
/// ffmpeg prints its banner and stream info before the actual error, so the
/// tail is the useful part.
pub const MAX_STDERR_BYTES: usize = 4000;

/// Encoder that shells out to an `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    binary: PathBuf,
    timeout: Duration,
}

impl FfmpegEncoder {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Full argument list for `job`.
    ///
    /// `ffmpeg -framerate <fps> -i <workspace>/frame_%06d.png <profile> -y <output>`
    pub fn build_args(job: &EncodeJob<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-hide_banner".into(),
            "-nostdin".into(),
            "-framerate".into(),
            job.frame_rate.to_string().into(),
            "-i".into(),
            job.input_pattern().into_os_string(),
        ];
        args.extend(job.format.codec_args().iter().map(OsString::from));
        args.push("-y".into());
        args.push(job.output_path().into_os_string());
        args
    }

    /// Check whether the configured binary can be executed (`ffmpeg -version`).
    pub async fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl VideoEncoder for FfmpegEncoder {
    async fn encode(&self, job: &EncodeJob<'_>) -> Result<PathBuf, EncodeError> {
        let output_path = job.output_path();

        let mut cmd = Command::new(&self.binary);
        cmd.args(Self::build_args(job))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the future (timeout, client gone) kills the process.
            .kill_on_drop(true);

        tracing::info!(
            frames = job.frame_count,
            frame_rate = job.frame_rate,
            format = job.format.extension(),
            "Starting ffmpeg export"
        );

        let child = cmd.spawn().map_err(EncodeError::Spawn)?;
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_elapsed) => {
                tracing::warn!(timeout_secs = self.timeout.as_secs(), "ffmpeg timed out");
                return Err(EncodeError::Timeout {
                    secs: self.timeout.as_secs(),
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EncodeError::Failed {
                exit_code: output.status.code(),
                stderr: tail(&stderr, MAX_STDERR_BYTES).trim().to_string(),
            });
        }

        if !tokio::fs::try_exists(&output_path).await? {
            return Err(EncodeError::MissingOutput(output_path));
        }

        tracing::info!(output = %output_path.display(), "ffmpeg export finished");
        Ok(output_path)
    }
}

/// Last `max_bytes` of `s`, cut on a char boundary.
fn tail(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut start = s.len() - max_bytes;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
