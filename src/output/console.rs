//! Console output utilities.

use chrono::{TimeZone, Utc};
use console::style;

use crate::api::Submission;
use crate::media::MediaLink;

/// Longest selftext excerpt shown in post details.
pub const SELFTEXT_PREVIEW_CHARS: usize = 500;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     reddit-media-dl                                   ║
║     Browse hot posts and grab their media             ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// One numbered line of the post listing.
pub fn format_post_line(number: usize, post: &Submission) -> String {
    format!(
        "{} {} {} {} {} {}",
        style(format!("{}.", number)).red(),
        style("Title:").yellow(),
        style(&post.title).green(),
        style("|").magenta(),
        style("Upvotes:").yellow(),
        style(post.score).green()
    )
}

/// Print the numbered post listing followed by the total.
pub fn print_post_list(posts: &[Submission]) {
    for (i, post) in posts.iter().enumerate() {
        println!("{}", format_post_line(i + 1, post));
    }
    println!(
        "{} {}",
        style("Total posts displayed:").red(),
        style(posts.len()).green()
    );
    if posts.is_empty() {
        println!("{}", style("No posts found matching the criteria.").red());
    }
}

/// Selftext cut to the preview length, with `...` when shortened.
pub fn selftext_preview(selftext: &str) -> String {
    let mut chars = selftext.chars();
    let preview: String = chars.by_ref().take(SELFTEXT_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

/// Format a Unix timestamp in seconds as UTC.
pub fn format_created(created_utc: f64) -> String {
    Utc.timestamp_opt(created_utc as i64, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| created_utc.to_string())
}

/// Flag values are shown capitalized, e.g. `True`.
fn format_flag(value: bool) -> String {
    let text = if value { "True" } else { "False" };
    text.to_string()
}

/// Label/value rows of the post details block.
pub fn post_detail_rows(post: &Submission) -> Vec<(&'static str, String)> {
    vec![
        ("Title", post.title.clone()),
        ("Author", post.author_name().to_string()),
        ("Score", post.score.to_string()),
        ("ID", post.id.clone()),
        ("URL", post.url.clone().unwrap_or_else(|| "N/A".to_string())),
        ("Permalink", post.permalink_url()),
        ("Created (UTC)", format_created(post.created_utc)),
        ("Number of Comments", post.num_comments.to_string()),
        ("Selftext", selftext_preview(&post.selftext)),
        ("Is NSFW", format_flag(post.over_18)),
        ("Is Stickied", format_flag(post.stickied)),
        ("Subreddit", post.subreddit.clone()),
        (
            "Flair",
            post.link_flair_text
                .clone()
                .unwrap_or_else(|| "None".to_string()),
        ),
    ]
}

/// Print the details block for the selected post.
pub fn print_post_details(post: &Submission) {
    println!();
    println!("{}", style("--- Post Details ---").cyan());
    for (label, value) in post_detail_rows(post) {
        println!(
            "{} {}",
            style(format!("{}:", label)).yellow(),
            style(value).green()
        );
    }
}

/// Print the extracted media link(s), or that none were found.
pub fn print_media_links(link: Option<&MediaLink>) {
    match link {
        Some(link) => {
            println!("{}", style("Direct Media Link(s):").yellow());
            for url in link.urls() {
                println!("{}", style(url).green());
            }
            println!();
        }
        None => println!(
            "{} {}",
            style("Direct Media Link(s):").yellow(),
            style("None found").red()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Submission {
        Submission {
            id: "abc".into(),
            title: "Sunset".into(),
            score: 1234,
            author: Some("alice".into()),
            permalink: "/r/pics/comments/abc/sunset/".into(),
            created_utc: 1_700_000_000.0,
            subreddit: "pics".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_post_line() {
        console::set_colors_enabled(false);
        assert_eq!(
            format_post_line(3, &sample_post()),
            "3. Title: Sunset | Upvotes: 1234"
        );
    }

    #[test]
    fn test_selftext_preview() {
        assert_eq!(selftext_preview("short"), "short");

        let exact = "x".repeat(SELFTEXT_PREVIEW_CHARS);
        assert_eq!(selftext_preview(&exact), exact);

        let long = "y".repeat(SELFTEXT_PREVIEW_CHARS + 1);
        let preview = selftext_preview(&long);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), SELFTEXT_PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_format_created() {
        assert_eq!(format_created(1_700_000_000.0), "2023-11-14 22:13:20 UTC");
    }

    #[test]
    fn test_post_detail_rows() {
        let rows = post_detail_rows(&sample_post());
        let get = |label: &str| {
            rows.iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("Author"), "alice");
        assert_eq!(get("Permalink"), "https://reddit.com/r/pics/comments/abc/sunset/");
        assert_eq!(get("URL"), "N/A");
        assert_eq!(get("Is NSFW"), "False");
        assert_eq!(get("Is Stickied"), "False");
        assert_eq!(get("Flair"), "None");

        let mut nsfw = sample_post();
        nsfw.over_18 = true;
        let rows = post_detail_rows(&nsfw);
        assert!(rows.contains(&("Is NSFW", "True".to_string())));
    }
}
