//! Reader-side view over an assembled feed: one outlet, last N days.

use crate::dates::{Clock, parse_canonical};
use crate::models::{ArticleRecord, Source};
use chrono::Duration;

pub const DEFAULT_DAYS_BACK: u32 = 7;
pub const MAX_DAYS_BACK: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedView {
    /// `None` shows every source.
    pub source: Option<Source>,
    pub days_back: u32,
}

impl Default for FeedView {
    fn default() -> Self {
        Self {
            source: None,
            days_back: DEFAULT_DAYS_BACK,
        }
    }
}

impl FeedView {
    /// Records dated after `today - days_back` from the selected source, in
    /// their original order. The boundary day itself is out: an article's
    /// midnight falls before "now minus N days" at any time of day but
    /// midnight. Records whose date cannot be read are dropped.
    pub fn apply<'a>(&self, articles: &'a [ArticleRecord], clock: &impl Clock) -> Vec<&'a ArticleRecord> {
        let days = self.days_back.clamp(1, MAX_DAYS_BACK);
        let cutoff = clock.today() - Duration::days(i64::from(days));
        articles
            .iter()
            .filter(|a| parse_canonical(&a.date).is_some_and(|d| d > cutoff))
            .filter(|a| self.source.is_none_or(|s| a.source == s))
            .collect()
    }
}
