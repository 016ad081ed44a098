//! Subreddit feed module.
//!
//! Provides:
//! - The `PostSource` seam over the hot feed
//! - Title-based filtering of displayed posts

pub mod filter;
pub mod source;

pub use filter::TitleFilter;
pub use source::{collect_hot_posts, PostSource};
