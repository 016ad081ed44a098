//! Per-post download outcome tracking.

use std::path::PathBuf;

use crate::media::MediaType;

/// What happened to each file of a post.
#[derive(Debug, Default)]
pub struct DownloadReport {
    /// Files written, in download order.
    pub saved: Vec<PathBuf>,

    /// URLs that could not be downloaded.
    pub failed: Vec<String>,

    // Statistics
    pub pic_count: u64,
    pub vid_count: u64,
    pub audio_count: u64,
    pub other_count: u64,
}

impl DownloadReport {
    /// Record a saved file.
    pub fn record_saved(&mut self, path: PathBuf, media_type: MediaType) {
        match media_type {
            MediaType::Image => self.pic_count += 1,
            MediaType::Video => self.vid_count += 1,
            MediaType::Audio => self.audio_count += 1,
            MediaType::Unknown => self.other_count += 1,
        }
        self.saved.push(path);
    }

    /// Record a URL that failed.
    pub fn record_failed(&mut self, url: impl Into<String>) {
        self.failed.push(url.into());
    }

    /// Whether at least one file was saved.
    pub fn is_success(&self) -> bool {
        !self.saved.is_empty()
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count + self.audio_count + self.other_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts() {
        let mut report = DownloadReport::default();
        assert!(!report.is_success());

        report.record_saved(PathBuf::from("a.jpg"), MediaType::Image);
        report.record_saved(PathBuf::from("b.mp4"), MediaType::Video);
        report.record_saved(PathBuf::from("c.bin"), MediaType::Unknown);
        report.record_failed("https://example.com/d.png");

        assert!(report.is_success());
        assert_eq!(report.total_downloaded(), 3);
        assert_eq!(report.pic_count, 1);
        assert_eq!(report.vid_count, 1);
        assert_eq!(report.failed, vec!["https://example.com/d.png"]);
    }
}
