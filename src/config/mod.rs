//! Configuration module for reddit-media-dl.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration and input validation

pub mod loader;
pub mod validation;

pub use loader::{Config, OptionsConfig, RedditConfig};
pub use validation::{
    parse_post_count, parse_subreddit, validate_config, validate_post_count, MAX_POST_COUNT,
};
