//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reddit: RedditConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Reddit API credentials and endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RedditConfig {
    /// OAuth application client ID.
    #[serde(default)]
    pub client_id: String,

    /// OAuth application client secret.
    #[serde(default)]
    pub client_secret: String,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Base URL for the token endpoint.
    #[serde(default = "default_auth_base")]
    pub auth_base: String,

    /// Base URL for authenticated API calls.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Listing and download options.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionsConfig {
    /// Output path template, e.g. `downloads/%(title)s.%(ext)s`.
    #[serde(default = "default_output_template")]
    pub output_template: String,

    /// Posts whose lowercased title contains any of these are hidden.
    #[serde(default = "default_excluded_phrases")]
    pub excluded_phrases: Vec<String>,

    /// Extra posts fetched so filtered ones can be replaced.
    #[serde(default = "default_fetch_margin")]
    pub fetch_margin: usize,

    /// Download attempts per file.
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Resume `.part` files with range requests.
    #[serde(default = "default_true")]
    pub continue_partial: bool,

    /// Replace files that already exist at the output path.
    #[serde(default = "default_true")]
    pub overwrite: bool,

    /// Container used when muxing separate video and audio streams.
    #[serde(default = "default_merge_format")]
    pub merge_output_format: String,

    /// External downloader binary (e.g. `yt-dlp`) for posts without direct media.
    #[serde(default)]
    pub external_downloader: Option<String>,

    /// Whether to show download progress.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            user_agent: default_user_agent(),
            auth_base: default_auth_base(),
            api_base: default_api_base(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            output_template: default_output_template(),
            excluded_phrases: default_excluded_phrases(),
            fetch_margin: default_fetch_margin(),
            retries: default_retries(),
            continue_partial: true,
            overwrite: true,
            merge_output_format: default_merge_format(),
            external_downloader: None,
            show_progress: true,
        }
    }
}

fn default_user_agent() -> String {
    format!(
        "rust:reddit-media-dl:v{} (by /u/reddit-media-dl)",
        env!("CARGO_PKG_VERSION")
    )
}

fn default_auth_base() -> String {
    "https://www.reddit.com".to_string()
}

fn default_api_base() -> String {
    "https://oauth.reddit.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_output_template() -> String {
    "downloads/%(title)s.%(ext)s".to_string()
}

fn default_excluded_phrases() -> Vec<String> {
    vec!["daily thread".to_string(), "any political content".to_string()]
}

fn default_fetch_margin() -> usize {
    10
}

fn default_retries() -> u32 {
    10
}

fn default_merge_format() -> String {
    "mp4".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from an explicit path, else the per-user config file, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Per-user config file location, e.g. `~/.config/reddit-media-dl/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "reddit-media-dl")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.options.output_template, "downloads/%(title)s.%(ext)s");
        assert_eq!(config.options.fetch_margin, 10);
        assert_eq!(config.options.retries, 10);
        assert!(config.options.overwrite);
        assert_eq!(
            config.options.excluded_phrases,
            vec!["daily thread", "any political content"]
        );
        assert_eq!(config.reddit.api_base, "https://oauth.reddit.com");
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[reddit]
client_id = "abc"

[options]
fetch_margin = 3
excluded_phrases = ["megathread"]
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.reddit.client_id, "abc");
        assert_eq!(config.reddit.auth_base, "https://www.reddit.com");
        assert_eq!(config.options.fetch_margin, 3);
        assert_eq!(config.options.excluded_phrases, vec!["megathread"]);
        assert_eq!(config.options.retries, 10);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
