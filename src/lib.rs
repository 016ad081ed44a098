//! reddit-media-dl - browse a subreddit's hot posts and download their media.
//!
//! # Features
//!
//! - Hot feed listing with title filtering
//! - Interactive post selection
//! - Media link extraction for images, hosted videos, embeds, and galleries
//! - Templated output paths
//! - Retrying, resumable downloads
//! - HLS video+audio muxing via ffmpeg
//! - Optional external downloader hand-off
//!
//! # Example
//!
//! ```no_run
//! use reddit_media_dl::{collect_hot_posts, extract_media_link, Config, Downloader, RedditApi, TitleFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.reddit.client_id = std::env::var("REDDIT_CLIENT_ID")?;
//!     config.reddit.client_secret = std::env::var("REDDIT_CLIENT_SECRET")?;
//!
//!     let api = RedditApi::new(&config.reddit)?;
//!     let filter = TitleFilter::new(&config.options.excluded_phrases);
//!     let posts = collect_hot_posts(&api, "pics", 5, 10, &filter).await?;
//!
//!     let downloader = Downloader::new(&config)?;
//!     if let Some(post) = posts.first() {
//!         let link = extract_media_link(post);
//!         let report = downloader.download_post(post, link.as_ref()).await?;
//!         println!("{:?}", report.saved);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod feed;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{RedditApi, Submission};
pub use config::Config;
pub use download::{DownloadReport, Downloader};
pub use error::{Error, Result};
pub use feed::{collect_hot_posts, PostSource, TitleFilter};
pub use media::{extract_media_link, MediaItem, MediaLink, MediaType};
