//! reddit-media-dl - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use reddit_media_dl::{
    api::RedditApi,
    cli::{validate_selection, Args, Prompt},
    config::{parse_subreddit, validate_config, validate_post_count, Config},
    download::Downloader,
    error::{exit_codes, Error, Result},
    feed::{collect_hot_posts, TitleFilter},
    media::extract_media_link,
    output::{
        create_spinner, print_banner, print_download_report, print_error, print_info,
        print_media_links, print_post_details, print_post_list, print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run() -> Result<()> {
    // .env must be loaded before clap reads REDDIT_* variables
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            print_warning(&format!("Could not load .env: {}", e));
        }
    }

    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration and merge CLI arguments into it
    let mut config = Config::load_or_default(args.config.as_deref())?;
    args.merge_into_config(&mut config);
    validate_config(&config)?;

    let mut prompt = Prompt::stdio();

    let subreddit = match &args.subreddit {
        Some(name) => parse_subreddit(name)?,
        None => prompt.ask_subreddit()?,
    };

    let count = match args.count {
        Some(count) => {
            validate_post_count(count)?;
            count
        }
        None => prompt.ask_post_count()?,
    };

    // Fetch and display the feed
    let api = RedditApi::new(&config.reddit)?;
    let title_filter = TitleFilter::new(&config.options.excluded_phrases);

    let spinner = create_spinner(&format!("Fetching hot posts from r/{}...", subreddit));
    let posts = collect_hot_posts(
        &api,
        &subreddit,
        count,
        config.options.fetch_margin,
        &title_filter,
    )
    .await;
    spinner.finish_and_clear();
    let posts = posts?;

    print_post_list(&posts);
    if posts.is_empty() {
        return Ok(());
    }

    // Pick a post
    let index = match args.select {
        Some(selection) => validate_selection(selection, posts.len())?,
        None => prompt.select_post(posts.len())?,
    };
    let post = &posts[index];

    print_post_details(post);
    let link = extract_media_link(post);
    print_media_links(link.as_ref());

    if args.no_download {
        return Ok(());
    }

    // Download
    let downloader = Downloader::new(&config)?;
    print_info("Downloading media...");
    let report = downloader.download_post(post, link.as_ref()).await?;
    print_download_report(&report);

    if !report.is_success() {
        return Err(Error::Download(format!(
            "Nothing could be downloaded from post {}",
            post.id
        )));
    }

    print_success(&format!("Saved {} file(s)", report.saved.len()));
    Ok(())
}
