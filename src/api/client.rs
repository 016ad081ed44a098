//! Reddit API HTTP client.

use std::time::Duration;

use reqwest::{header, redirect, Client, Response, StatusCode};
use tokio::sync::RwLock;

use crate::api::auth::AccessToken;
use crate::api::types::*;
use crate::config::RedditConfig;
use crate::error::{Error, Result};

/// Maximum posts Reddit returns per listing page.
pub const PAGE_SIZE: usize = 100;

/// Fallback wait when a 429 carries no reset header.
const DEFAULT_RATE_LIMIT_SECONDS: u64 = 60;

/// Reddit API client using application-only OAuth.
pub struct RedditApi {
    client: Client,
    client_id: String,
    client_secret: String,
    auth_base: String,
    api_base: String,
    token: RwLock<Option<AccessToken>>,
}

impl RedditApi {
    /// Create a new API client. No request is made until the first call.
    pub fn new(config: &RedditConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            auth_base: config.auth_base.trim_end_matches('/').to_string(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Request a fresh application-only token.
    pub async fn authenticate(&self) -> Result<AccessToken> {
        let url = format!("{}/api/v1/access_token", self.auth_base);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Token response status: {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication(format!(
                "HTTP {}: check REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET",
                status
            )));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited(rate_limit_reset(&response)));
        }

        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Authentication(format!("HTTP {}: {}", status, text)));
        }

        // Reddit reports some grant failures as 200 with an error body
        if let Ok(err) = serde_json::from_str::<TokenError>(&text) {
            return Err(Error::Authentication(err.error));
        }

        let token: TokenResponse = serde_json::from_str(&text).map_err(|e| {
            Error::Authentication(format!("Failed to parse token response: {}", e))
        })?;

        Ok(AccessToken::from_response(token))
    }

    /// Current token, refreshing it if missing or about to expire.
    async fn access_token(&self) -> Result<AccessToken> {
        {
            let token = self.token.read().await;
            if let Some(token) = token.as_ref() {
                if !token.is_expired() {
                    return Ok(token.clone());
                }
            }
        }

        let mut slot = self.token.write().await;
        let token = self.authenticate().await?;
        *slot = Some(token.clone());
        Ok(token)
    }

    /// Drop the cached token so the next call re-authenticates.
    async fn invalidate_token(&self) {
        *self.token.write().await = None;
    }

    /// Make an authenticated GET request, re-authenticating once on 401.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        let url = format!("{}{}", self.api_base, path);

        for attempt in 0..2 {
            let token = self.access_token().await?;
            tracing::debug!("GET {} {:?}", url, query);

            let response = self
                .client
                .get(&url)
                .query(query)
                .header(header::AUTHORIZATION, token.header_value())
                .send()
                .await?;

            let status = response.status();
            tracing::debug!("Response status: {}", status);

            if status == StatusCode::UNAUTHORIZED && attempt == 0 {
                tracing::debug!("Token rejected, re-authenticating");
                self.invalidate_token().await;
                continue;
            }

            return Ok(response);
        }

        Err(Error::Authentication(
            "Token rejected after re-authentication".into(),
        ))
    }

    /// Fetch up to `limit` posts from a subreddit's hot feed.
    pub async fn hot(&self, subreddit: &str, limit: usize) -> Result<Vec<Submission>> {
        let mut posts = Vec::with_capacity(limit);
        let mut after: Option<String> = None;

        while posts.len() < limit {
            let page_limit = (limit - posts.len()).min(PAGE_SIZE);
            let listing = self.hot_page(subreddit, page_limit, after.as_deref()).await?;

            let received = listing.children.len();
            posts.extend(
                listing
                    .children
                    .into_iter()
                    .filter(|thing| thing.kind == "t3")
                    .map(|thing| thing.data),
            );

            match listing.after {
                Some(cursor) if received > 0 => after = Some(cursor),
                _ => break,
            }
        }

        posts.truncate(limit);
        Ok(posts)
    }

    /// Fetch one page of the hot feed.
    async fn hot_page(
        &self,
        subreddit: &str,
        limit: usize,
        after: Option<&str>,
    ) -> Result<Listing<Submission>> {
        let path = format!("/r/{}/hot", subreddit);
        let mut query = vec![("limit", limit.to_string()), ("raw_json", "1".to_string())];
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }

        let response = self.get(&path, &query).await?;
        let response = check_listing_status(subreddit, response).await?;

        let text = response.text().await?;
        tracing::debug!("Hot listing response length: {} bytes", text.len());

        let thing: Thing<Listing<Submission>> = serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse listing: {} - Response: {}",
                e,
                text.chars().take(500).collect::<String>()
            ))
        })?;

        Ok(thing.data)
    }
}

/// Map listing error statuses onto our error variants.
async fn check_listing_status(subreddit: &str, response: Response) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND || status.is_redirection() {
        return Err(Error::SubredditNotFound(subreddit.to_string()));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(Error::RateLimited(rate_limit_reset(&response)));
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Authentication(format!("HTTP {}", status)));
    }

    if status == StatusCode::FORBIDDEN {
        return Err(Error::Api(format!(
            "r/{} is private, quarantined, or banned (HTTP 403)",
            subreddit
        )));
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Api(format!("HTTP {}: {}", status, body)))
}

/// Seconds until the rate limit window resets.
fn rate_limit_reset(response: &Response) -> u64 {
    response
        .headers()
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .map(|secs| secs.ceil() as u64)
        .unwrap_or(DEFAULT_RATE_LIMIT_SECONDS)
}
