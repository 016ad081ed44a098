use httpmock::prelude::*;
use reddit_media_dl::config::RedditConfig;
use reddit_media_dl::{collect_hot_posts, Error, RedditApi, TitleFilter};
use serde_json::{json, Value};

fn config_for(server: &MockServer) -> RedditConfig {
    RedditConfig {
        client_id: "client-id".into(),
        client_secret: "client-secret".into(),
        user_agent: "test:reddit-media-dl:v0 (by /u/tester)".into(),
        auth_base: server.base_url(),
        api_base: server.base_url(),
        timeout_seconds: 5,
    }
}

fn post_json(id: &str, title: &str) -> Value {
    json!({
        "kind": "t3",
        "data": {
            "id": id,
            "name": format!("t3_{}", id),
            "title": title,
            "score": 10,
            "author": "someone",
            "url": format!("https://i.redd.it/{}.jpg", id),
            "permalink": format!("/r/pics/comments/{}/x/", id),
            "subreddit": "pics",
            "post_hint": "image"
        }
    })
}

fn listing(children: Vec<Value>, after: Option<&str>) -> Value {
    json!({
        "kind": "Listing",
        "data": { "after": after, "children": children }
    })
}

async fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/access_token")
                .header_exists("authorization")
                .body_contains("grant_type=client_credentials");
            then.status(200).json_body(json!({
                "access_token": "tok123",
                "token_type": "bearer",
                "expires_in": 86400,
                "scope": "*"
            }));
        })
        .await
}

#[tokio::test]
async fn test_hot_fetches_token_once_and_lists_posts() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server).await;

    let hot = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/r/pics/hot")
                .query_param("limit", "3")
                .query_param("raw_json", "1")
                .header("authorization", "bearer tok123");
            then.status(200).json_body(listing(
                vec![
                    post_json("a", "First"),
                    post_json("b", "Second"),
                    post_json("c", "Third"),
                ],
                Some("t3_c"),
            ));
        })
        .await;

    let api = RedditApi::new(&config_for(&server)).unwrap();
    let posts = api.hot("pics", 3).await.unwrap();
    let again = api.hot("pics", 3).await.unwrap();

    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0].id, "a");
    assert_eq!(posts[2].title, "Third");
    assert_eq!(again.len(), 3);

    token.assert_hits_async(1).await;
    hot.assert_hits_async(2).await;
}

#[tokio::test]
async fn test_hot_paginates_with_after_cursor() {
    let server = MockServer::start_async().await;
    mock_token(&server).await;

    let first_page: Vec<Value> = (0..100)
        .map(|i| post_json(&format!("p{}", i), &format!("Post {}", i)))
        .collect();
    let second_page: Vec<Value> = (100..150)
        .map(|i| post_json(&format!("p{}", i), &format!("Post {}", i)))
        .collect();

    let page1 = server
        .mock_async(|when, then| {
            when.method(GET).path("/r/pics/hot").query_param("limit", "100");
            then.status(200).json_body(listing(first_page, Some("t3_p99")));
        })
        .await;

    let page2 = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/r/pics/hot")
                .query_param("limit", "50")
                .query_param("after", "t3_p99");
            then.status(200).json_body(listing(second_page, Some("t3_p149")));
        })
        .await;

    let api = RedditApi::new(&config_for(&server)).unwrap();
    let posts = api.hot("pics", 150).await.unwrap();

    assert_eq!(posts.len(), 150);
    assert_eq!(posts[0].id, "p0");
    assert_eq!(posts[149].id, "p149");
    page1.assert_async().await;
    page2.assert_async().await;
}

#[tokio::test]
async fn test_hot_stops_when_feed_ends() {
    let server = MockServer::start_async().await;
    mock_token(&server).await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/r/tiny/hot");
            then.status(200)
                .json_body(listing(vec![post_json("only", "Only post")], None));
        })
        .await;

    let api = RedditApi::new(&config_for(&server)).unwrap();
    let posts = api.hot("tiny", 25).await.unwrap();
    assert_eq!(posts.len(), 1);
}

#[tokio::test]
async fn test_unknown_subreddit() {
    let server = MockServer::start_async().await;
    mock_token(&server).await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/r/doesnotexist/hot");
            then.status(404).json_body(json!({"message": "Not Found", "error": 404}));
        })
        .await;

    let api = RedditApi::new(&config_for(&server)).unwrap();
    let err = api.hot("doesnotexist", 5).await.unwrap_err();
    assert!(matches!(err, Error::SubredditNotFound(name) if name == "doesnotexist"));
}

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start_async().await;
    mock_token(&server).await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/r/pics/hot");
            then.status(429).header("x-ratelimit-reset", "12.4");
        })
        .await;

    let api = RedditApi::new(&config_for(&server)).unwrap();
    let err = api.hot("pics", 5).await.unwrap_err();
    assert!(matches!(err, Error::RateLimited(13)));
}

#[tokio::test]
async fn test_bad_credentials() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/access_token");
            then.status(401).json_body(json!({"message": "Unauthorized", "error": 401}));
        })
        .await;

    let api = RedditApi::new(&config_for(&server)).unwrap();
    let err = api.hot("pics", 5).await.unwrap_err();
    assert!(matches!(err, Error::Authentication(_)));
}

#[tokio::test]
async fn test_grant_error_body() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/access_token");
            then.status(200).json_body(json!({"error": "unsupported_grant_type"}));
        })
        .await;

    let api = RedditApi::new(&config_for(&server)).unwrap();
    let err = api.authenticate().await.unwrap_err();
    assert!(matches!(err, Error::Authentication(msg) if msg == "unsupported_grant_type"));
}

#[tokio::test]
async fn test_collect_hot_posts_filters_titles() {
    let server = MockServer::start_async().await;
    mock_token(&server).await;

    let hot = server
        .mock_async(|when, then| {
            when.method(GET).path("/r/pics/hot").query_param("limit", "12");
            then.status(200).json_body(listing(
                vec![
                    post_json("d", "Daily Thread for October"),
                    post_json("a", "Mountains"),
                    post_json("p", "Rule: no Any Political Content"),
                    post_json("b", "Lake"),
                    post_json("c", "Forest"),
                ],
                None,
            ));
        })
        .await;

    let api = RedditApi::new(&config_for(&server)).unwrap();
    let filter = TitleFilter::new(["daily thread", "any political content"]);
    let posts = collect_hot_posts(&api, "pics", 2, 10, &filter).await.unwrap();

    let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    hot.assert_async().await;
}

#[tokio::test]
async fn test_private_subreddit() {
    let server = MockServer::start_async().await;
    mock_token(&server).await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/r/secret/hot");
            then.status(403).json_body(json!({"reason": "private", "error": 403}));
        })
        .await;

    let api = RedditApi::new(&config_for(&server)).unwrap();
    let err = api.hot("secret", 5).await.unwrap_err();
    assert!(matches!(err, Error::Api(msg) if msg.contains("r/secret")));
}

#[tokio::test]
async fn test_redirect_means_unknown_subreddit() {
    let server = MockServer::start_async().await;
    mock_token(&server).await;

    let search = server
        .mock_async(|when, then| {
            when.method(GET).path("/subreddits/search.json");
            then.status(200).json_body(json!({}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/r/bannedsub/hot");
            then.status(302)
                .header("location", "/subreddits/search.json?q=bannedsub");
        })
        .await;

    let api = RedditApi::new(&config_for(&server)).unwrap();
    let err = api.hot("bannedsub", 5).await.unwrap_err();
    assert!(matches!(err, Error::SubredditNotFound(name) if name == "bannedsub"));
    search.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_rejected_token_reauthenticates_once() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server).await;

    let hot = server
        .mock_async(|when, then| {
            when.method(GET).path("/r/pics/hot");
            then.status(401).json_body(json!({"message": "Unauthorized", "error": 401}));
        })
        .await;

    let api = RedditApi::new(&config_for(&server)).unwrap();
    let err = api.hot("pics", 5).await.unwrap_err();

    assert!(matches!(err, Error::Authentication(_)));
    token.assert_hits_async(2).await;
    hot.assert_hits_async(2).await;
}
