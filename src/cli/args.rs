//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Browse a subreddit's hot posts and download media from one.
#[derive(Parser, Debug, Default)]
#[command(
    name = "reddit-media-dl",
    version,
    about = "Browse hot subreddit posts and download their media",
    long_about = "Lists hot posts from a subreddit, lets you pick one, and downloads \
                  its image, video, or gallery.\n\n\
                  Anything not given on the command line is asked for interactively."
)]
pub struct Args {
    /// Subreddit to browse (name, r/name, or URL).
    #[arg(short, long)]
    pub subreddit: Option<String>,

    /// Number of posts to display.
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Post number to pick from the listing, skipping the prompt.
    #[arg(long)]
    pub select: Option<usize>,

    /// Reddit app client ID.
    #[arg(long = "client-id", env = "REDDIT_CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    /// Reddit app client secret.
    #[arg(long = "client-secret", env = "REDDIT_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// User agent sent to Reddit.
    #[arg(short = 'a', long = "user-agent", env = "REDDIT_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Output path template, e.g. "downloads/%(title)s.%(ext)s".
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// External downloader for posts without direct media (e.g. yt-dlp).
    #[arg(long = "external-downloader")]
    pub external_downloader: Option<String>,

    /// Download attempts per file.
    #[arg(long)]
    pub retries: Option<u32>,

    /// Never replace existing files.
    #[arg(long)]
    pub no_overwrite: bool,

    /// Show the post and its media links without downloading.
    #[arg(long)]
    pub no_download: bool,

    /// Hide download progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        // Override credentials if provided
        if let Some(client_id) = &self.client_id {
            config.reddit.client_id = client_id.clone();
        }

        if let Some(client_secret) = &self.client_secret {
            config.reddit.client_secret = client_secret.clone();
        }

        if let Some(user_agent) = &self.user_agent {
            config.reddit.user_agent = user_agent.clone();
        }

        // Override options if provided
        if let Some(output) = &self.output {
            config.options.output_template = output.clone();
        }

        if let Some(tool) = &self.external_downloader {
            config.options.external_downloader = Some(tool.clone());
        }

        if let Some(retries) = self.retries {
            config.options.retries = retries;
        }

        // Boolean flags (only override if set to non-default)
        if self.no_overwrite {
            config.options.overwrite = false;
        }

        if self.quiet {
            config.options.show_progress = false;
        }
    }
}
