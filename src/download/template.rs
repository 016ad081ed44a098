//! Output path templates (`downloads/%(title)s.%(ext)s`).

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::api::Submission;
use crate::fs::naming::{sanitize_component, with_index_suffix, EMPTY_COMPONENT};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%\((\w+)\)s").unwrap());

/// Values substituted into a template.
#[derive(Debug, Clone)]
pub struct TemplateFields<'a> {
    pub title: &'a str,
    pub id: &'a str,
    pub subreddit: &'a str,
    pub author: &'a str,
    pub ext: &'a str,
    /// 1-based position for multi-file posts.
    pub index: Option<usize>,
}

impl<'a> TemplateFields<'a> {
    /// Fields for one file of a post.
    pub fn for_post(post: &'a Submission, ext: &'a str, index: Option<usize>) -> Self {
        Self {
            title: &post.title,
            id: &post.id,
            subreddit: &post.subreddit,
            author: post.author_name(),
            ext,
            index,
        }
    }
}

/// A `%(key)s`-style output template.
#[derive(Debug, Clone)]
pub struct OutputTemplate {
    template: String,
}

impl OutputTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The raw template string.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Whether the template references `%(key)s`.
    pub fn has_placeholder(&self, key: &str) -> bool {
        self.template.contains(&format!("%({})s", key))
    }

    /// Render the template into an output path.
    ///
    /// Unknown keys render as `NA`. When a file has an index and the template
    /// has no `%(index)s`, `_{index}` is appended to the file stem.
    pub fn render(&self, fields: &TemplateFields<'_>) -> PathBuf {
        let rendered = PLACEHOLDER.replace_all(&self.template, |caps: &Captures| {
            match &caps[1] {
                "title" => sanitize_component(fields.title),
                "id" => sanitize_component(fields.id),
                "subreddit" => sanitize_component(fields.subreddit),
                "author" => sanitize_component(fields.author),
                "ext" => sanitize_component(fields.ext),
                "index" => fields
                    .index
                    .map(|i| i.to_string())
                    .unwrap_or_else(|| EMPTY_COMPONENT.to_string()),
                _ => EMPTY_COMPONENT.to_string(),
            }
        });

        let path = PathBuf::from(rendered.as_ref());

        match fields.index {
            Some(index) if !self.has_placeholder("index") => with_index_suffix(&path, index),
            _ => path,
        }
    }
}

impl Default for OutputTemplate {
    fn default() -> Self {
        Self::new("downloads/%(title)s.%(ext)s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields<'a>(title: &'a str, ext: &'a str, index: Option<usize>) -> TemplateFields<'a> {
        TemplateFields {
            title,
            id: "abc123",
            subreddit: "pics",
            author: "alice",
            ext,
            index,
        }
    }

    #[test]
    fn test_default_template() {
        let template = OutputTemplate::default();
        assert_eq!(
            template.render(&fields("My cat", "jpg", None)),
            PathBuf::from("downloads/My cat.jpg")
        );
    }

    #[test]
    fn test_title_cannot_escape_directory() {
        let template = OutputTemplate::default();
        assert_eq!(
            template.render(&fields("../../etc/passwd", "jpg", None)),
            PathBuf::from("downloads/_.._etc_passwd.jpg")
        );
    }

    #[test]
    fn test_all_placeholders() {
        let template = OutputTemplate::new("%(subreddit)s/%(author)s-%(id)s-%(index)s.%(ext)s");
        assert_eq!(
            template.render(&fields("t", "png", Some(3))),
            PathBuf::from("pics/alice-abc123-3.png")
        );
    }

    #[test]
    fn test_index_suffix_added_without_placeholder() {
        let template = OutputTemplate::default();
        assert_eq!(
            template.render(&fields("Gallery", "jpg", Some(2))),
            PathBuf::from("downloads/Gallery_2.jpg")
        );
    }

    #[test]
    fn test_unknown_key_renders_na() {
        let template = OutputTemplate::new("out/%(uploader)s_%(index)s.%(ext)s");
        assert_eq!(
            template.render(&fields("t", "mp4", None)),
            PathBuf::from("out/NA_NA.mp4")
        );
    }

    #[test]
    fn test_fields_for_post() {
        let post = Submission {
            id: "xyz".into(),
            title: "Title".into(),
            subreddit: "rust".into(),
            author: Some("[deleted]".into()),
            ..Default::default()
        };
        let f = TemplateFields::for_post(&post, "gif", None);
        assert_eq!(f.author, "N/A");
        assert_eq!(f.subreddit, "rust");
    }
}
