//! Media module for link extraction and item representation.

pub mod extension;
pub mod item;
pub mod link;

pub use extension::resolve_extension;
pub use item::{MediaItem, MediaType};
pub use link::{extract_media_link, MediaLink};
