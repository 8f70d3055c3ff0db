use std::path::PathBuf;
use std::time::Duration;

use pfx_core::export::ExportLimits;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// SQLite connection string.
    pub database_url: String,
    /// Optional application secret. Nothing is signed yet; it is only
    /// reported at startup so deployments can verify it was picked up.
    pub secret_key: Option<String>,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `300`).
    pub request_timeout_secs: u64,
    /// Maximum accepted request body in bytes. Export requests carry every
    /// frame inline, so this is far above axum's 2 MiB default.
    pub max_body_bytes: usize,
    /// Directory holding `index.html` and the front-end assets.
    pub static_dir: PathBuf,
    /// Video export settings.
    pub export: ExportConfig,
}

/// Settings for the frame-to-video export path.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Encoder binary (default: `ffmpeg`, resolved through `PATH`).
    pub ffmpeg_bin: PathBuf,
    /// Parent directory for per-request workspaces.
    pub tmp_dir: PathBuf,
    /// Wall-clock limit for a single encoder run.
    pub timeout_secs: u64,
    /// Maximum frames accepted in one request.
    pub max_frames: usize,
}

impl ExportConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn limits(&self) -> ExportLimits {
        ExportLimits {
            root: self.tmp_dir.clone(),
            max_frames: self.max_frames,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                 |
    /// |------------------------|-----------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                               |
    /// | `PORT`                 | `3000`                                  |
    /// | `DATABASE_URL`         | `sqlite://particle_system.db?mode=rwc`  |
    /// | `SECRET_KEY`           | unset                                   |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`                 |
    /// | `REQUEST_TIMEOUT_SECS` | `300`                                   |
    /// | `MAX_BODY_BYTES`       | `268435456` (256 MiB)                   |
    /// | `STATIC_DIR`           | `static`                                |
    /// | `FFMPEG_BIN`           | `ffmpeg`                                |
    /// | `EXPORT_TMP_DIR`       | system temp dir                         |
    /// | `EXPORT_TIMEOUT_SECS`  | `240`                                   |
    /// | `EXPORT_MAX_FRAMES`    | `3600`                                  |
    ///
    /// Panics on unparsable numeric values so misconfiguration fails fast.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");

        let port: u16 = var("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let database_url = var("DATABASE_URL", "sqlite://particle_system.db?mode=rwc");

        let secret_key = lookup("SECRET_KEY").filter(|s| !s.is_empty());

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS", "300")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_body_bytes: usize = var("MAX_BODY_BYTES", "268435456")
            .parse()
            .expect("MAX_BODY_BYTES must be a valid usize");

        let static_dir = PathBuf::from(var("STATIC_DIR", "static"));

        let export = ExportConfig {
            ffmpeg_bin: PathBuf::from(var("FFMPEG_BIN", "ffmpeg")),
            tmp_dir: lookup("EXPORT_TMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            timeout_secs: var("EXPORT_TIMEOUT_SECS", "240")
                .parse()
                .expect("EXPORT_TIMEOUT_SECS must be a valid u64"),
            max_frames: var("EXPORT_MAX_FRAMES", "3600")
                .parse()
                .expect("EXPORT_MAX_FRAMES must be a valid usize"),
        };

        Self {
            host,
            port,
            database_url,
            secret_key,
            cors_origins,
            request_timeout_secs,
            max_body_bytes,
            static_dir,
            export,
        }
    }
}
