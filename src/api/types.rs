//! API response type definitions.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// OAuth token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
    #[serde(default)]
    pub scope: Option<String>,
}

fn default_expires_in() -> u64 {
    3600
}

/// OAuth error body, e.g. `{"error": "invalid_grant"}`.
#[derive(Debug, Deserialize)]
pub struct TokenError {
    pub error: String,
}

/// Generic "thing" wrapper: `{"kind": "t3", "data": {...}}`.
#[derive(Debug, Deserialize)]
pub struct Thing<T> {
    pub kind: String,
    pub data: T,
}

/// Paginated listing envelope.
#[derive(Debug, Deserialize)]
pub struct Listing<T> {
    pub after: Option<String>,
    #[serde(default)]
    pub children: Vec<Thing<T>>,
}

/// A link submission from a subreddit feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Submission {
    pub id: String,
    /// Fullname, e.g. `t3_abc123`; used as the pagination cursor.
    #[serde(default)]
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub score: i64,
    pub author: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub over_18: bool,
    #[serde(default)]
    pub stickied: bool,
    #[serde(default)]
    pub subreddit: String,
    pub link_flair_text: Option<String>,
    pub post_hint: Option<String>,
    pub is_gallery: Option<bool>,
    pub media: Option<Media>,
    pub media_metadata: Option<MediaMetadataMap>,
    pub gallery_data: Option<GalleryData>,
}

/// Embedded media description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Media {
    pub reddit_video: Option<RedditVideo>,
    pub oembed: Option<Oembed>,
}

/// Reddit-hosted video.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedditVideo {
    pub fallback_url: Option<String>,
    pub hls_url: Option<String>,
    pub dash_url: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub duration: Option<u64>,
}

/// oEmbed description of a third-party embed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Oembed {
    pub provider_name: Option<String>,
    pub title: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// A gallery's `media_metadata`, keeping the order entries appear in the response.
#[derive(Debug, Clone, Default)]
pub struct MediaMetadataMap {
    entries: Vec<(String, MediaMetadata)>,
}

impl MediaMetadataMap {
    pub fn get(&self, id: &str) -> Option<&MediaMetadata> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, item)| item)
    }

    /// Entries in response order.
    pub fn values(&self) -> impl Iterator<Item = &MediaMetadata> {
        self.entries.iter().map(|(_, item)| item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, MediaMetadata)> for MediaMetadataMap {
    fn from_iter<I: IntoIterator<Item = (K, MediaMetadata)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for MediaMetadataMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = MediaMetadataMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of media ids to metadata")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, MediaMetadata>()? {
                    entries.push(entry);
                }
                Ok(MediaMetadataMap { entries })
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// One entry of a gallery's `media_metadata` map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaMetadata {
    pub status: Option<String>,
    /// Element kind, e.g. `Image` or `AnimatedImage`.
    pub e: Option<String>,
    /// MIME type.
    pub m: Option<String>,
    /// Source (full-size) rendition.
    pub s: Option<MediaSource>,
}

/// Source rendition of a gallery item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaSource {
    pub u: Option<String>,
    pub gif: Option<String>,
    pub mp4: Option<String>,
    pub x: Option<u32>,
    pub y: Option<u32>,
}

/// Gallery ordering.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GalleryData {
    #[serde(default)]
    pub items: Vec<GalleryItem>,
}

/// A single gallery slot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GalleryItem {
    pub media_id: String,
    pub caption: Option<String>,
}

impl Submission {
    /// Author name, or `N/A` for deleted accounts.
    pub fn author_name(&self) -> &str {
        match self.author.as_deref() {
            Some(name) if name != "[deleted]" => name,
            _ => "N/A",
        }
    }

    /// Absolute permalink.
    pub fn permalink_url(&self) -> String {
        format!("https://reddit.com{}", self.permalink)
    }
}
