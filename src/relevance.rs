//! Keyword relevance heuristic.
//!
//! A text is relevant when any configured keyword occurs in it as a
//! case-insensitive substring. An article is relevant when its title, its
//! summary or its body is.

use crate::config::AggregatorConfig;

#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    keywords: Vec<String>,
}

impl RelevanceFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &AggregatorConfig) -> Self {
        Self::new(&config.keywords)
    }

    pub fn is_relevant(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|kw| text.contains(kw.as_str()))
    }

    /// Title, summary and body are checked independently; one hit is enough.
    pub fn article_matches(&self, title: &str, summary: &str, content: &str) -> bool {
        self.is_relevant(title) || self.is_relevant(summary) || self.is_relevant(content)
    }
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::from_config(&AggregatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_case_insensitively() {
        let filter = RelevanceFilter::default();
        assert!(filter.is_relevant("this article is about CASTE violence"));
        assert!(filter.is_relevant("SC/ST Act amendment"));
    }

    #[test]
    fn test_rejects_unrelated_text() {
        let filter = RelevanceFilter::default();
        assert!(!filter.is_relevant("a completely unrelated gardening tip"));
        assert!(!filter.is_relevant(""));
    }

    #[test]
    fn test_article_matches_on_any_field() {
        let filter = RelevanceFilter::new(["dalit"]);
        assert!(filter.article_matches("Budget news", "", "A Dalit village"));
        assert!(filter.article_matches("Dalit rights", "", ""));
        assert!(!filter.article_matches("Budget news", "markets", "stocks rallied"));
    }

    #[test]
    fn test_custom_keywords_are_normalized() {
        let filter = RelevanceFilter::new(["Manual Scavenging", ""]);
        assert!(filter.is_relevant("deaths during manual scavenging continue"));
        assert!(!filter.is_relevant("nothing here"));
    }
}
