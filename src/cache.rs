//! Disposable on-disk cache of the last assembled feed.
//!
//! A full acquisition run takes minutes, so the assembled feed is kept with
//! its fetch time and reused until it is older than the TTL. Unlike the
//! saved-item store, a cache file that cannot be read is simply a miss.

use crate::error::PersistenceError;
use crate::models::ArticleRecord;
use crate::store::write_json_pretty;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, warn};

pub const DEFAULT_CACHE_PATH: &str = "news_cache.json";

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    fetched_at: DateTime<Utc>,
    articles: Vec<ArticleRecord>,
}

#[derive(Debug, Clone)]
pub struct FeedCache {
    path: PathBuf,
    ttl: Duration,
}

impl FeedCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    /// The cached feed, if there is one younger than the TTL at `now`.
    pub async fn load_fresh(&self, now: DateTime<Utc>) -> Option<Vec<ArticleRecord>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No feed cache");
                return None;
            }
        };
        let snapshot: Snapshot = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable feed cache");
                return None;
            }
        };

        let age = now.signed_duration_since(snapshot.fetched_at);
        match age.to_std() {
            Ok(age) if age < self.ttl => {
                info!(
                    age_secs = age.as_secs(),
                    count = snapshot.articles.len(),
                    "Using cached feed"
                );
                Some(snapshot.articles)
            }
            // Negative age means the clock moved backwards; refetch.
            _ => {
                debug!(age_secs = age.num_seconds(), "Feed cache is stale");
                None
            }
        }
    }

    pub async fn store(
        &self,
        articles: &[ArticleRecord],
        now: DateTime<Utc>,
    ) -> Result<(), PersistenceError> {
        let snapshot = Snapshot {
            fetched_at: now,
            articles: articles.to_vec(),
        };
        write_json_pretty(&self.path, &snapshot).await?;
        debug!(path = %self.path.display(), "Stored feed cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;
    use chrono::TimeZone;

    fn articles() -> Vec<ArticleRecord> {
        vec![ArticleRecord {
            source: Source::Newslaundry,
            title: "Reservation hearing".to_string(),
            link: "https://www.newslaundry.com/1".to_string(),
            summary: String::new(),
            date: "2024-01-05".to_string(),
            content: "Body".to_string(),
        }]
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, h, m, 0).unwrap()
    }

    #[tokio::test]
    async fn test_fresh_cache_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FeedCache::new(dir.path().join("cache.json"), Duration::from_secs(3600));
        cache.store(&articles(), at(10, 0)).await.unwrap();
        assert_eq!(cache.load_fresh(at(10, 59)).await, Some(articles()));
    }

    #[tokio::test]
    async fn test_stale_or_future_cache_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FeedCache::new(dir.path().join("cache.json"), Duration::from_secs(3600));
        cache.store(&articles(), at(10, 0)).await.unwrap();
        assert_eq!(cache.load_fresh(at(11, 0)).await, None);
        assert_eq!(cache.load_fresh(at(9, 0)).await, None);
    }

    #[tokio::test]
    async fn test_missing_or_corrupt_cache_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        let cache = FeedCache::new(&path, Duration::from_secs(3600));
        assert_eq!(cache.load_fresh(at(10, 0)).await, None);
        fs::write(&path, "not json").await.unwrap();
        assert_eq!(cache.load_fresh(at(10, 0)).await, None);
    }
}
