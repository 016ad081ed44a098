//! Title exclusion filter.

/// Hides posts whose title contains any excluded phrase (case-insensitive).
#[derive(Debug, Clone, Default)]
pub struct TitleFilter {
    phrases: Vec<String>,
}

impl TitleFilter {
    /// Build a filter from phrases; empty phrases are ignored.
    pub fn new<S: AsRef<str>, I: IntoIterator<Item = S>>(phrases: I) -> Self {
        let phrases = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { phrases }
    }

    /// Whether a post with this title should be displayed.
    pub fn allows(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        !self.phrases.iter().any(|phrase| title.contains(phrase))
    }

    /// Excluded phrases, lowercased.
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}
