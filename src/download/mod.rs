//! Download module for post media.
//!
//! This module provides:
//! - Output path templates
//! - Direct file downloading with retry and resume
//! - HLS video+audio muxing
//! - External downloader hand-off
//! - Per-post result tracking

pub mod direct;
pub mod external;
pub mod hls;
pub mod report;
pub mod template;

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;

use crate::api::Submission;
use crate::config::{Config, OptionsConfig};
use crate::error::{Error, Result};
use crate::media::{MediaItem, MediaLink, MediaType};

pub use direct::{download_direct, DirectOptions};
pub use external::download_external;
pub use hls::download_hls;
pub use report::DownloadReport;
pub use template::{OutputTemplate, TemplateFields};

/// Fetches post media to templated paths.
pub struct Downloader {
    client: Client,
    options: OptionsConfig,
    template: OutputTemplate,
}

impl Downloader {
    /// Create a downloader sharing the configured user agent.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.reddit.user_agent)
            .connect_timeout(Duration::from_secs(config.reddit.timeout_seconds))
            .build()
            .map_err(|e| Error::Download(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            options: config.options.clone(),
            template: OutputTemplate::new(config.options.output_template.clone()),
        })
    }

    fn direct_options(&self) -> DirectOptions {
        DirectOptions {
            retries: self.options.retries,
            continue_partial: self.options.continue_partial,
            overwrite: self.options.overwrite,
            show_progress: self.options.show_progress,
        }
    }

    /// Output path for one file of `post`.
    pub fn output_path(&self, post: &Submission, ext: &str, index: Option<usize>) -> PathBuf {
        self.template
            .render(&TemplateFields::for_post(post, ext, index))
    }

    /// Download one media item. Returns the saved path, or `None` on failure.
    pub async fn download_media_from_link(
        &self,
        item: &MediaItem,
        post: &Submission,
    ) -> Option<PathBuf> {
        match self.try_download(item, post).await {
            Ok(path) => {
                tracing::info!("Downloaded: {}", path.display());
                Some(path)
            }
            Err(e) => {
                tracing::warn!("Failed to download {}: {}", item.download_url, e);
                None
            }
        }
    }

    async fn try_download(&self, item: &MediaItem, post: &Submission) -> Result<PathBuf> {
        if let Some(hls_url) = item.hls_url.as_deref() {
            let output = self.output_path(post, &self.options.merge_output_format, item.index);
            if !self.options.overwrite && output.exists() {
                tracing::info!("Already downloaded: {}", output.display());
                return Ok(output);
            }
            match download_hls(&self.client, hls_url, &output, self.options.overwrite).await {
                Ok(path) => return Ok(path),
                Err(e) => {
                    tracing::warn!("HLS download failed ({}), using video-only fallback", e);
                }
            }
        }

        download_direct(
            &self.client,
            &item.download_url,
            &self.direct_options(),
            |ext| self.output_path(post, ext, item.index),
        )
        .await
    }

    /// Download everything a post links to.
    ///
    /// With no extracted media, the post URL goes to the external downloader
    /// if one is configured; otherwise the post has nothing to download.
    pub async fn download_post(
        &self,
        post: &Submission,
        link: Option<&MediaLink>,
    ) -> Result<DownloadReport> {
        let mut report = DownloadReport::default();

        let Some(link) = link else {
            return self.download_with_external(post).await;
        };

        tracing::debug!("Downloading {} from post {}", link.kind(), post.id);

        for item in link.items() {
            match self.download_media_from_link(&item, post).await {
                Some(path) => {
                    let media_type = path
                        .extension()
                        .and_then(|e| e.to_str())
                        .map(MediaType::from_extension)
                        .unwrap_or_else(|| item.media_type());
                    report.record_saved(path, media_type);
                }
                None => report.record_failed(item.download_url.clone()),
            }
        }

        Ok(report)
    }

    async fn download_with_external(&self, post: &Submission) -> Result<DownloadReport> {
        let (Some(tool), Some(url)) = (
            self.options.external_downloader.as_deref(),
            post.url.as_deref(),
        ) else {
            return Err(Error::NoMedia(post.id.clone()));
        };

        let mut report = DownloadReport::default();
        match download_external(tool, url, self.template.as_str(), &self.options).await {
            Ok(path) => {
                tracing::info!("Downloaded: {}", path.display());
                let media_type = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(MediaType::from_extension)
                    .unwrap_or(MediaType::Unknown);
                report.record_saved(path, media_type);
            }
            Err(e) => {
                tracing::warn!("{}", e);
                report.record_failed(url);
            }
        }

        Ok(report)
    }
}
