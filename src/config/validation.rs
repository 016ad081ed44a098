//! Configuration and input validation logic.

use std::path::Path;

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;

/// Minimum length for user agent.
const MIN_USER_AGENT_LENGTH: usize = 10;

/// Largest hot listing Reddit will page through.
pub const MAX_POST_COUNT: usize = 1000;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_credential("client_id", &config.reddit.client_id)?;
    validate_credential("client_secret", &config.reddit.client_secret)?;
    validate_user_agent(&config.reddit.user_agent)?;
    validate_output_template(&config.options.output_template)?;

    Ok(())
}

/// Validate an OAuth credential value.
pub fn validate_credential(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::MissingConfig(format!(
            "{} (set REDDIT_{} or pass it on the command line)",
            field,
            field.to_uppercase()
        )));
    }

    let lower = value.to_lowercase();
    if lower.contains("replaceme") || lower.starts_with("your_") {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "Value appears to be a placeholder. Please provide your Reddit app credentials."
                .to_string(),
        });
    }

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.is_empty() {
        return Err(Error::MissingConfig("user_agent".to_string()));
    }

    if user_agent.len() < MIN_USER_AGENT_LENGTH {
        return Err(Error::ConfigValidation {
            field: "user_agent".to_string(),
            message: format!(
                "User agent must be at least {} characters (got {})",
                MIN_USER_AGENT_LENGTH,
                user_agent.len()
            ),
        });
    }

    Ok(())
}

/// Validate the output path template.
pub fn validate_output_template(template: &str) -> Result<()> {
    if template.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: "output_template".to_string(),
            message: "Template cannot be empty".to_string(),
        });
    }

    if !template.contains("%(ext)s") && Path::new(template).extension().is_none() {
        return Err(Error::ConfigValidation {
            field: "output_template".to_string(),
            message: format!(
                "Template '{}' needs %(ext)s or an explicit file extension",
                template
            ),
        });
    }

    Ok(())
}

/// Extract a subreddit name from `name`, `r/name`, `/r/name`, or a reddit URL.
pub fn parse_subreddit(input: &str) -> Result<String> {
    let input = input.trim();

    let candidate = if input.starts_with("http://") || input.starts_with("https://") {
        let url_pattern = Regex::new(r"/r/([^/?#]+)").unwrap();
        url_pattern
            .captures(input)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| Error::ConfigValidation {
                field: "subreddit".to_string(),
                message: format!("Could not extract subreddit from URL: {}", input),
            })?
    } else {
        input
            .trim_start_matches('/')
            .trim_start_matches("r/")
            .trim_end_matches('/')
    };

    let name_pattern = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_]{1,20}$").unwrap();
    if name_pattern.is_match(candidate) {
        return Ok(candidate.to_string());
    }

    Err(Error::ConfigValidation {
        field: "subreddit".to_string(),
        message: format!(
            "Invalid subreddit name: '{}'. Use 2-21 letters, digits, or underscores.",
            input
        ),
    })
}

/// Parse the number of posts to display.
pub fn parse_post_count(input: &str) -> Result<usize> {
    let count: usize = input.trim().parse().map_err(|_| Error::ConfigValidation {
        field: "count".to_string(),
        message: format!("'{}' is not a whole number", input.trim()),
    })?;

    validate_post_count(count)?;
    Ok(count)
}

/// Validate the number of posts to display.
pub fn validate_post_count(count: usize) -> Result<()> {
    if count == 0 || count > MAX_POST_COUNT {
        return Err(Error::ConfigValidation {
            field: "count".to_string(),
            message: format!("Post count must be between 1 and {}", MAX_POST_COUNT),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subreddit_plain() {
        assert_eq!(parse_subreddit("rust").unwrap(), "rust");
        assert_eq!(parse_subreddit("  EarthPorn \n").unwrap(), "EarthPorn");
        assert_eq!(parse_subreddit("r/rust").unwrap(), "rust");
        assert_eq!(parse_subreddit("/r/rust/").unwrap(), "rust");
    }

    #[test]
    fn test_parse_subreddit_url() {
        assert_eq!(
            parse_subreddit("https://www.reddit.com/r/pics/hot/").unwrap(),
            "pics"
        );
        assert!(parse_subreddit("https://www.reddit.com/user/someone").is_err());
    }

    #[test]
    fn test_parse_subreddit_invalid() {
        assert!(parse_subreddit("").is_err());
        assert!(parse_subreddit("a").is_err());
        assert!(parse_subreddit("has space").is_err());
        assert!(parse_subreddit("_leading").is_err());
        assert!(parse_subreddit("waytoolongsubredditname").is_err());
    }

    #[test]
    fn test_parse_post_count() {
        assert_eq!(parse_post_count("5").unwrap(), 5);
        assert_eq!(parse_post_count(" 12 ").unwrap(), 12);
        assert!(parse_post_count("0").is_err());
        assert!(parse_post_count("-3").is_err());
        assert!(parse_post_count("ten").is_err());
        assert!(parse_post_count("1001").is_err());
    }

    #[test]
    fn test_validate_credential() {
        assert!(validate_credential("client_id", "aBcD1234").is_ok());
        assert!(matches!(
            validate_credential("client_id", ""),
            Err(Error::MissingConfig(_))
        ));
        assert!(validate_credential("client_secret", "your_secret").is_err());
    }

    #[test]
    fn test_validate_output_template() {
        assert!(validate_output_template("downloads/%(title)s.%(ext)s").is_ok());
        assert!(validate_output_template("out/%(id)s.mp4").is_ok());
        assert!(validate_output_template("out/%(id)s").is_err());
        assert!(validate_output_template("  ").is_err());
    }

    #[test]
    fn test_validate_config_requires_credentials() {
        let mut config = Config::default();
        assert!(validate_config(&config).is_err());

        config.reddit.client_id = "clientid123".into();
        config.reddit.client_secret = "secret456".into();
        assert!(validate_config(&config).is_ok());
    }
}
