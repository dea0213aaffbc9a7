//! RSS 2.0, RDF and Atom parsing.
//!
//! `feed-rs` does the format work; this module only flattens its model into
//! the few fields an adapter needs. Extension elements such as `media:title`
//! stay in their own namespace and never replace the entry's own fields.

use crate::dates::CANONICAL_FORMAT;
use crate::error::ParseError;
use crate::utils::plain_text;
use feed_rs::model::{Entry, Link};
use feed_rs::parser;

/// One entry of a syndication feed, as published.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: Option<String>,
    pub summary: String,
    /// Canonical `YYYY-MM-DD` (UTC) of `published`, else `updated`.
    pub published: Option<String>,
}

/// `alternate` (or no rel at all) wins over `self`, `enclosure` and friends.
fn pick_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|l| l.rel.as_deref().is_none_or(|rel| rel == "alternate"))
        .or_else(|| links.first())
        .map(|l| l.href.trim().to_string())
        .filter(|href| !href.is_empty())
}

impl From<Entry> for FeedEntry {
    fn from(entry: Entry) -> Self {
        let summary = entry
            .summary
            .map(|s| plain_text(&s.content))
            .filter(|s| !s.is_empty())
            .or_else(|| entry.content.and_then(|c| c.body).map(|b| plain_text(&b)))
            .unwrap_or_default();

        FeedEntry {
            title: entry.title.map(|t| plain_text(&t.content)).unwrap_or_default(),
            link: pick_link(&entry.links),
            summary,
            published: entry
                .published
                .or(entry.updated)
                .map(|dt| dt.date_naive().format(CANONICAL_FORMAT).to_string()),
        }
    }
}

/// Parse an RSS/Atom document. `url` is only used for error messages.
pub fn parse_feed(url: &str, xml: &str) -> Result<Vec<FeedEntry>, ParseError> {
    let feed = parser::parse(xml.as_bytes()).map_err(|e| ParseError::Feed {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    Ok(feed.entries.into_iter().map(FeedEntry::from).collect())
}
