//! Direct media link extraction from submissions.

use crate::api::types::{MediaMetadata, Submission};
use crate::media::item::MediaItem;

/// File suffixes treated as direct media links.
const DIRECT_SUFFIXES: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".mp4", ".webm"];

/// Direct media found in a post, by post shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaLink {
    /// `post_hint = "image"`: the post URL itself.
    Image(String),
    /// Reddit-hosted video. `fallback_url` is video-only; `hls_url` carries audio too.
    HostedVideo {
        fallback_url: String,
        hls_url: Option<String>,
    },
    /// Third-party video embed; only its thumbnail is directly addressable.
    RichVideoThumbnail(String),
    /// Gallery source images, in gallery order.
    Gallery(Vec<String>),
    /// Post URL ending in a known media extension.
    Direct(String),
}

impl MediaLink {
    /// URLs to display and download.
    pub fn urls(&self) -> Vec<&str> {
        match self {
            MediaLink::Image(url) | MediaLink::RichVideoThumbnail(url) | MediaLink::Direct(url) => {
                vec![url.as_str()]
            }
            MediaLink::HostedVideo { fallback_url, .. } => vec![fallback_url.as_str()],
            MediaLink::Gallery(urls) => urls.iter().map(String::as_str).collect(),
        }
    }

    /// Files to fetch, one per URL. Gallery items carry their 1-based position.
    pub fn items(&self) -> Vec<MediaItem> {
        match self {
            MediaLink::HostedVideo {
                fallback_url,
                hls_url,
            } => vec![MediaItem {
                download_url: fallback_url.clone(),
                hls_url: hls_url.clone(),
                index: None,
            }],
            MediaLink::Gallery(urls) if urls.len() > 1 => urls
                .iter()
                .enumerate()
                .map(|(i, url)| MediaItem {
                    index: Some(i + 1),
                    ..MediaItem::new(url.as_str())
                })
                .collect(),
            other => other.urls().into_iter().map(MediaItem::new).collect(),
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MediaLink::Image(_) => "image",
            MediaLink::HostedVideo { .. } => "hosted video",
            MediaLink::RichVideoThumbnail(_) => "rich video thumbnail",
            MediaLink::Gallery(_) => "gallery",
            MediaLink::Direct(_) => "direct link",
        }
    }
}

/// Extract direct media link(s) from a submission.
///
/// Checks the post hint first (image, hosted video, rich video), then
/// galleries, then a URL ending in a known media extension. A gallery with
/// no usable items yields `None` without trying the URL suffix.
pub fn extract_media_link(post: &Submission) -> Option<MediaLink> {
    if let Some(hint) = post.post_hint.as_deref() {
        if let Some(link) = from_post_hint(post, hint) {
            return Some(link);
        }
    }

    if post.is_gallery == Some(true) {
        let urls = gallery_urls(post);
        return if urls.is_empty() {
            None
        } else {
            Some(MediaLink::Gallery(urls))
        };
    }

    let url = post.url.as_deref()?;
    if DIRECT_SUFFIXES.iter().any(|suffix| url.ends_with(suffix)) {
        return Some(MediaLink::Direct(url.to_string()));
    }

    None
}

fn from_post_hint(post: &Submission, hint: &str) -> Option<MediaLink> {
    match hint {
        "image" => post.url.clone().map(MediaLink::Image),
        "hosted:video" => {
            let video = post.media.as_ref()?.reddit_video.as_ref()?;
            let fallback_url = video.fallback_url.clone()?;
            Some(MediaLink::HostedVideo {
                fallback_url,
                hls_url: video.hls_url.clone(),
            })
        }
        "rich:video" => post
            .media
            .as_ref()?
            .oembed
            .as_ref()?
            .thumbnail_url
            .clone()
            .map(MediaLink::RichVideoThumbnail),
        _ => None,
    }
}

/// Source URLs of gallery items that have one.
fn gallery_urls(post: &Submission) -> Vec<String> {
    let Some(metadata) = post.media_metadata.as_ref() else {
        return Vec::new();
    };

    let source_url = |item: &MediaMetadata| item.s.as_ref().and_then(|s| s.u.clone());

    match post.gallery_data.as_ref() {
        Some(gallery) if !gallery.items.is_empty() => gallery
            .items
            .iter()
            .filter_map(|item| metadata.get(&item.media_id).and_then(source_url))
            .collect(),
        // Response order, as listed by the API
        _ => metadata.values().filter_map(source_url).collect(),
    }
}
