//! Downloadable media item representation.

use crate::media::extension::{extension_from_url, is_hls_url};

/// Type of media content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
    Audio,
    Unknown,
}

impl MediaType {
    /// Classify by file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "bmp" | "avif" => MediaType::Image,
            "mp4" | "webm" | "mov" | "mkv" | "m4v" | "gifv" => MediaType::Video,
            "mp3" | "m4a" | "ogg" | "wav" | "aac" | "opus" => MediaType::Audio,
            _ => MediaType::Unknown,
        }
    }
}

/// A single file to fetch for a post.
#[derive(Debug, Clone)]
pub struct MediaItem {
    /// Download URL.
    pub download_url: String,

    /// HLS master playlist carrying video and audio, when available.
    pub hls_url: Option<String>,

    /// 1-based position within a gallery; `None` for single-file posts.
    pub index: Option<usize>,
}

impl MediaItem {
    /// A single-file item.
    pub fn new(download_url: impl Into<String>) -> Self {
        Self {
            download_url: download_url.into(),
            hls_url: None,
            index: None,
        }
    }

    /// Extension guessed from the URL, before any response is seen.
    pub fn url_extension(&self) -> Option<String> {
        extension_from_url(&self.download_url)
    }

    /// Media type guessed from the URL.
    pub fn media_type(&self) -> MediaType {
        if is_hls_url(&self.download_url) {
            return MediaType::Video;
        }
        self.url_extension()
            .map(|ext| MediaType::from_extension(&ext))
            .unwrap_or(MediaType::Unknown)
    }
}
