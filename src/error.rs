//! Error types for the reddit-media-dl application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Input errors
    #[error("Input aborted")]
    Aborted,

    // API errors
    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Subreddit not found: r/{0}")]
    SubredditNotFound(String),

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    #[error("No downloadable media found in post {0}")]
    NoMedia(String),

    #[error("HLS processing error: {0}")]
    Hls(String),

    // External tool errors
    #[error("FFmpeg error: {0}")]
    FFmpeg(String),

    #[error("FFmpeg not found. Please install ffmpeg and ensure it's in your PATH.")]
    FFmpegNotFound,

    #[error("External downloader '{tool}' failed: {message}")]
    ExternalTool { tool: String, message: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const ABORT: i32 = 1;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}

impl Error {
    /// Exit code reported by the binary for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Aborted => exit_codes::ABORT,
            Error::Config(_)
            | Error::ConfigValidation { .. }
            | Error::MissingConfig(_)
            | Error::TomlParse(_) => exit_codes::CONFIG_ERROR,
            Error::Api(_)
            | Error::Authentication(_)
            | Error::SubredditNotFound(_)
            | Error::RateLimited(_)
            | Error::Http(_)
            | Error::Json(_) => exit_codes::API_ERROR,
            Error::Download(_)
            | Error::NoMedia(_)
            | Error::Hls(_)
            | Error::FFmpeg(_)
            | Error::FFmpegNotFound
            | Error::ExternalTool { .. } => exit_codes::DOWNLOAD_ERROR,
            _ => exit_codes::UNEXPECTED_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::Aborted.exit_code(), exit_codes::ABORT);
        assert_eq!(
            Error::MissingConfig("client_id".into()).exit_code(),
            exit_codes::CONFIG_ERROR
        );
        assert_eq!(
            Error::SubredditNotFound("nope".into()).exit_code(),
            exit_codes::API_ERROR
        );
        assert_eq!(
            Error::NoMedia("abc".into()).exit_code(),
            exit_codes::DOWNLOAD_ERROR
        );
        assert_eq!(
            Error::Io(std::io::Error::other("disk full")).exit_code(),
            exit_codes::UNEXPECTED_ERROR
        );
    }
}
