//! Export formats and their fixed encoder profiles.

/// Output container requested by the client.
///
/// Only `avi` and `mov` select their own profile; every other identifier
/// (including the client default `mp4`) falls back to WebM/VP9, which is the
/// format with the best alpha support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Avi,
    Mov,
    Webm,
}

impl ExportFormat {
    /// Map a requested format identifier to a supported profile.
    pub fn from_requested(requested: &str) -> Self {
        match requested.trim().to_ascii_lowercase().as_str() {
            "avi" => Self::Avi,
            "mov" => Self::Mov,
            _ => Self::Webm,
        }
    }

    /// File extension of the produced container.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Avi => "avi",
            Self::Mov => "mov",
            Self::Webm => "webm",
        }
    }

    /// `Content-Type` of the produced file.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Avi => "video/x-msvideo",
            Self::Mov => "video/quicktime",
            Self::Webm => "video/webm",
        }
    }

    /// Suggested download filename.
    pub fn download_name(self) -> String {
        format!("particle-animation.{}", self.extension())
    }

    /// Codec and pixel-format arguments placed between input and output.
    pub fn codec_args(self) -> &'static [&'static str] {
        match self {
            // PNG-in-AVI: lossless with alpha.
            Self::Avi => &["-c:v", "png", "-pix_fmt", "rgba", "-preset", "veryslow"],
            // QuickTime Animation: lossless RGB with alpha.
            Self::Mov => &["-c:v", "qtrle", "-pix_fmt", "argb"],
            Self::Webm => &[
                "-c:v",
                "libvpx-vp9",
                "-pix_fmt",
                "yuva420p",
                "-lossless",
                "1",
                "-quality",
                "best",
                "-auto-alt-ref",
                "0",
            ],
        }
    }
}
