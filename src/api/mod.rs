//! Reddit API module.
//!
//! This module provides:
//! - HTTP client for the Reddit OAuth API
//! - Application-only token handling
//! - API response types

pub mod auth;
pub mod client;
pub mod types;

pub use client::{RedditApi, PAGE_SIZE};
pub use types::*;
