//! Aggregate assembler: the last step before records reach a reader.
//!
//! 1. No candidates at all becomes a single sentinel "No articles found"
//!    record, so total acquisition failure is visible but never an error.
//! 2. Every date is made canonical. Blank dates become today; dates in some
//!    other recognizable format are converted; anything else becomes today
//!    with a warning.
//! 3. Records are sorted newest first. The sort is stable, so records from
//!    the same day keep their acquisition order.

use crate::dates::{Clock, is_canonical, to_canonical};
use crate::models::{ArticleRecord, Source};
use tracing::{info, instrument, warn};

pub const SENTINEL_TITLE: &str = "No articles found";
pub const SENTINEL_SUMMARY: &str = "Could not retrieve news from any source";

/// The synthetic record shown when nothing could be fetched.
pub fn sentinel(clock: &impl Clock) -> ArticleRecord {
    ArticleRecord {
        source: Source::Error,
        title: SENTINEL_TITLE.to_string(),
        link: "#".to_string(),
        summary: SENTINEL_SUMMARY.to_string(),
        date: clock.today_canonical(),
        content: String::new(),
    }
}

fn normalize_date(article: &mut ArticleRecord, today: &str) {
    let raw = article.date.trim();
    if raw.is_empty() {
        article.date = today.to_string();
    } else if !is_canonical(raw) {
        article.date = match to_canonical(raw) {
            Some(date) => date,
            None => {
                warn!(
                    title = %article.title,
                    date = %raw,
                    "Unrecognized date; using today"
                );
                today.to_string()
            }
        };
    } else if raw.len() != article.date.len() {
        article.date = raw.to_string();
    }
}

#[instrument(level = "info", skip_all, fields(candidates = candidates.len()))]
pub fn assemble(mut candidates: Vec<ArticleRecord>, clock: &impl Clock) -> Vec<ArticleRecord> {
    if candidates.is_empty() {
        warn!("No articles from any source; returning sentinel");
        return vec![sentinel(clock)];
    }

    let today = clock.today_canonical();
    for article in candidates.iter_mut() {
        normalize_date(article, &today);
    }

    candidates.sort_by(|a, b| b.date.cmp(&a.date));
    info!(count = candidates.len(), "Assembled feed");
    candidates
}
