//! Hot feed source and post collection.

use async_trait::async_trait;

use crate::api::{RedditApi, Submission};
use crate::error::Result;
use crate::feed::filter::TitleFilter;

/// Something that can list a subreddit's hot posts.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch up to `limit` posts in feed order.
    async fn hot(&self, subreddit: &str, limit: usize) -> Result<Vec<Submission>>;
}

#[async_trait]
impl PostSource for RedditApi {
    async fn hot(&self, subreddit: &str, limit: usize) -> Result<Vec<Submission>> {
        RedditApi::hot(self, subreddit, limit).await
    }
}

/// Fetch `count + margin` hot posts and keep the first `count` the filter allows.
pub async fn collect_hot_posts<S: PostSource + ?Sized>(
    source: &S,
    subreddit: &str,
    count: usize,
    margin: usize,
    filter: &TitleFilter,
) -> Result<Vec<Submission>> {
    let fetched = source.hot(subreddit, count + margin).await?;
    let total = fetched.len();

    let posts: Vec<Submission> = fetched
        .into_iter()
        .filter(|post| filter.allows(&post.title))
        .take(count)
        .collect();

    tracing::debug!(
        "Fetched {} posts from r/{}, keeping {}",
        total,
        subreddit,
        posts.len()
    );

    Ok(posts)
}
