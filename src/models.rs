//! Data models that flow through the aggregation pipeline.
//!
//! - [`Source`]: the fixed set of outlets, plus the `Error` sentinel
//! - [`ArticleRecord`]: one candidate or finished article
//! - [`SavedItem`]: the reduced form persisted by the saved-item store
//!
//! Dates are kept as canonical `YYYY-MM-DD` strings so that a plain string
//! comparison orders them chronologically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An originating outlet.
///
/// The serialized form is the outlet's display name (`"The Hindu"`,
/// `"Scroll.in"`, ...), which is also what ends up in the saved-items file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "The Hindu")]
    TheHindu,
    #[serde(rename = "Indian Express")]
    IndianExpress,
    #[serde(rename = "Scroll.in")]
    ScrollIn,
    #[serde(rename = "The Wire")]
    TheWire,
    #[serde(rename = "Alt News")]
    AltNews,
    #[serde(rename = "Newslaundry")]
    Newslaundry,
    #[serde(rename = "The Quint")]
    TheQuint,
    #[serde(rename = "Telegraph India")]
    TelegraphIndia,
    #[serde(rename = "The Lallantop")]
    TheLallantop,
    #[serde(rename = "Article 14")]
    Article14,
    /// Marks the synthetic "no results" record.
    #[serde(rename = "Error")]
    Error,
}

impl Source {
    /// Every real outlet, in the order a source picker would list them.
    pub const ALL: [Source; 10] = [
        Source::TheHindu,
        Source::IndianExpress,
        Source::ScrollIn,
        Source::TheWire,
        Source::AltNews,
        Source::Newslaundry,
        Source::TheQuint,
        Source::Article14,
        Source::TelegraphIndia,
        Source::TheLallantop,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Source::TheHindu => "The Hindu",
            Source::IndianExpress => "Indian Express",
            Source::ScrollIn => "Scroll.in",
            Source::TheWire => "The Wire",
            Source::AltNews => "Alt News",
            Source::Newslaundry => "Newslaundry",
            Source::TheQuint => "The Quint",
            Source::TelegraphIndia => "Telegraph India",
            Source::TheLallantop => "The Lallantop",
            Source::Article14 => "Article 14",
            Source::Error => "Error",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Source {
    type Err = String;

    /// Accepts the display name case-insensitively, ignoring spaces and dots,
    /// so `"scroll"`, `"Scroll.in"` and `"thehindu"` all resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squash = |v: &str| {
            v.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        };
        let wanted = squash(s);
        Source::ALL
            .iter()
            .copied()
            .find(|src| {
                let name = squash(src.name());
                name == wanted || name.strip_suffix("in") == Some(wanted.as_str())
            })
            .ok_or_else(|| format!("unknown news source: {s}"))
    }
}

/// A news article as produced by a site adapter.
///
/// `date` is empty until the assembler normalizes it; after assembly it is
/// always a canonical `YYYY-MM-DD` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub source: Source,
    pub title: String,
    /// Absolute URL, or `#` for the sentinel record.
    pub link: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub content: String,
}

impl ArticleRecord {
    pub fn is_sentinel(&self) -> bool {
        self.source == Source::Error
    }
}

/// An article the user chose to keep.
///
/// Two saved items are duplicates when every field is equal. Older files may
/// carry an empty `date` or lack `summary`, so both default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItem {
    pub title: String,
    pub source: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub summary: String,
    pub link: String,
}

impl From<&ArticleRecord> for SavedItem {
    fn from(article: &ArticleRecord) -> Self {
        SavedItem {
            title: article.title.clone(),
            source: article.source.name().to_string(),
            date: article.date.clone(),
            summary: article.summary.clone(),
            link: article.link.clone(),
        }
    }
}
