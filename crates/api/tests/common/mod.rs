#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use pfx_api::config::{ExportConfig, ServerConfig};
use pfx_api::router::build_app_router;
use pfx_api::state::AppState;
use pfx_core::export::{EncodeError, EncodeJob, ExportFormat, VideoEncoder};

/// Bytes written by [`FakeEncoder`] in place of a real video.
pub const FAKE_VIDEO: &[u8] = b"not really a video, but close enough";

/// Entry page served from the test static directory.
pub const INDEX_HTML: &str = "<!doctype html><title>Particles</title>";

// ---------------------------------------------------------------------------
// Fake encoders
// ---------------------------------------------------------------------------

/// What a [`FakeEncoder`] saw on its last call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenJob {
    pub frame_count: usize,
    pub frame_rate: u32,
    pub format: ExportFormat,
    /// Frame files present in the workspace when the encoder ran.
    pub files: Vec<String>,
}

/// Encoder that writes [`FAKE_VIDEO`] to the expected output path.
#[derive(Debug, Default)]
pub struct FakeEncoder {
    pub last_job: Mutex<Option<SeenJob>>,
}

#[async_trait]
impl VideoEncoder for FakeEncoder {
    async fn encode(&self, job: &EncodeJob<'_>) -> Result<PathBuf, EncodeError> {
        let mut files: Vec<String> = std::fs::read_dir(job.workspace)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        files.sort();

        *self.last_job.lock().unwrap() = Some(SeenJob {
            frame_count: job.frame_count,
            frame_rate: job.frame_rate,
            format: job.format,
            files,
        });

        let output = job.output_path();
        tokio::fs::write(&output, FAKE_VIDEO).await?;
        Ok(output)
    }
}

/// Encoder that always fails the way ffmpeg does on bad input.
#[derive(Debug)]
pub struct FailingEncoder {
    pub stderr: String,
}

#[async_trait]
impl VideoEncoder for FailingEncoder {
    async fn encode(&self, _job: &EncodeJob<'_>) -> Result<PathBuf, EncodeError> {
        Err(EncodeError::Failed {
            exit_code: Some(1),
            stderr: self.stderr.clone(),
        })
    }
}

/// Encoder that never finishes within a test's request timeout.
#[derive(Debug)]
pub struct StalledEncoder {
    pub delay: Duration,
}

#[async_trait]
impl VideoEncoder for StalledEncoder {
    async fn encode(&self, job: &EncodeJob<'_>) -> Result<PathBuf, EncodeError> {
        tokio::time::sleep(self.delay).await;
        let output = job.output_path();
        tokio::fs::write(&output, FAKE_VIDEO).await?;
        Ok(output)
    }
}

// ---------------------------------------------------------------------------
// Test application
// ---------------------------------------------------------------------------

/// A router plus the temporary directories backing it.
///
/// The directories live as long as the `TestApp`, so tests can inspect the
/// export root after a request completes.
pub struct TestApp {
    pub pool: SqlitePool,
    pub static_dir: TempDir,
    pub export_root: TempDir,
    pub max_frames: usize,
    pub request_timeout_secs: u64,
    encoder: Arc<dyn VideoEncoder>,
}

impl TestApp {
    /// Build an app backed by a [`FakeEncoder`].
    pub async fn new(pool: SqlitePool) -> Self {
        Self::with_encoder(pool, Arc::new(FakeEncoder::default())).await
    }

    pub async fn with_encoder(pool: SqlitePool, encoder: Arc<dyn VideoEncoder>) -> Self {
        pfx_db::ensure_schema(&pool).await.expect("create schema");

        let static_dir = tempfile::tempdir().expect("create static dir");
        std::fs::write(static_dir.path().join("index.html"), INDEX_HTML).expect("write index");
        std::fs::create_dir(static_dir.path().join("js")).expect("create js dir");
        std::fs::write(static_dir.path().join("js/app.js"), "console.log('hi');")
            .expect("write asset");

        Self {
            pool,
            static_dir,
            export_root: tempfile::tempdir().expect("create export root"),
            max_frames: 100,
            request_timeout_secs: 30,
            encoder,
        }
    }

    /// Build a test `ServerConfig` pointing at this app's directories.
    pub fn config(&self) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: "sqlite::memory:".to_string(),
            secret_key: None,
            cors_origins: vec!["http://localhost:5173".to_string()],
            request_timeout_secs: self.request_timeout_secs,
            max_body_bytes: 8 * 1024 * 1024,
            static_dir: self.static_dir.path().to_path_buf(),
            export: ExportConfig {
                ffmpeg_bin: PathBuf::from("ffmpeg"),
                tmp_dir: self.export_root.path().to_path_buf(),
                timeout_secs: 30,
                max_frames: self.max_frames,
            },
        }
    }

    /// Build the full application router, exactly as production does.
    pub fn router(&self) -> Router {
        build_app_router(AppState {
            pool: self.pool.clone(),
            config: Arc::new(self.config()),
            encoder: Arc::clone(&self.encoder),
        })
    }

    /// Names of everything left under the export root.
    pub fn leftover_workspaces(&self) -> Vec<String> {
        std::fs::read_dir(self.export_root.path())
            .expect("read export root")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    post_raw(app, uri, serde_json::to_vec(&json).unwrap()).await
}

/// POST an arbitrary body with a JSON content type.
pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a bodiless request with an arbitrary method.
pub async fn send(app: Router, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}
