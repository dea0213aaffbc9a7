//! # Caste News
//!
//! Aggregates caste and minority rights coverage from Indian news outlets.
//! Syndication feeds and site listings are scraped concurrently, filtered by
//! keyword relevance, merged newest-first, and shown in the terminal. Stories
//! can be kept in a local saved-items file.
//!
//! ## Usage
//!
//! ```sh
//! caste_news feed --days 3
//! caste_news saved add 0
//! caste_news saved list
//! ```
//!
//! ## Architecture
//!
//! 1. **Acquisition**: every site adapter runs in a bounded pool with its
//!    own time budget; a failing source yields nothing but never stops the run
//! 2. **Assembly**: candidates are merged, dates normalized, sorted newest first
//! 3. **Caching**: the assembled feed is reused until it is older than the TTL
//! 4. **Viewing**: a source and day-window filter picks what is shown and
//!    defines the indices `saved add` accepts

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod assemble;
mod cache;
mod cli;
mod config;
mod dates;
mod error;
mod extract;
mod feed;
mod fetch;
mod models;
mod orchestrator;
mod outputs;
mod relevance;
mod scrapers;
mod store;
mod utils;
mod view;

use assemble::assemble;
use cache::FeedCache;
use cli::{Cli, Command, SavedAction, ViewArgs};
use dates::{Clock, SystemClock};
use error::PersistenceError;
use fetch::http_fetcher;
use models::{ArticleRecord, SavedItem};
use orchestrator::Orchestrator;
use outputs::{render_feed, render_saved};
use store::SavedStore;
use view::FeedView;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    // --- Tracing init ---
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    debug!(saved_path = %args.saved_path, cache_path = %args.cache_path, "Parsed CLI arguments");

    let result = match &args.command {
        Command::Feed {
            view,
            refresh,
            full,
            format,
        } => {
            let articles = load_feed(&args, *refresh, &SystemClock).await?;
            let shown = feed_view(view).apply(&articles, &SystemClock);
            info!(total = articles.len(), shown = shown.len(), "Feed ready");
            print!("{}", render_feed(&shown, *format, *full)?);
            Ok(())
        }
        Command::Saved { action } => run_saved(&args, action).await,
    };

    let elapsed = start_time.elapsed();
    debug!(?elapsed, "Execution complete");
    result
}

fn feed_view(view: &ViewArgs) -> FeedView {
    FeedView {
        source: view.source,
        days_back: view.days,
    }
}

/// The assembled feed, from the cache when it is fresh, otherwise from a
/// full acquisition run.
#[instrument(level = "info", skip(args, clock))]
async fn load_feed(
    args: &Cli,
    refresh: bool,
    clock: &impl Clock,
) -> Result<Vec<ArticleRecord>, Box<dyn Error>> {
    let cache = FeedCache::new(&args.cache_path, args.cache_ttl());
    if !refresh {
        if let Some(articles) = cache.load_fresh(clock.now()).await {
            return Ok(articles);
        }
    }

    let config = args.aggregator_config();
    let orchestrator = Orchestrator::new(http_fetcher(&config)?, &config);
    let candidates = orchestrator.collect_all().await;
    let articles = assemble(candidates, clock);

    // A run where every source failed is not worth caching.
    let only_sentinel = matches!(articles.as_slice(), [a] if a.is_sentinel());
    if !only_sentinel {
        if let Err(e) = cache.store(&articles, clock.now()).await {
            warn!(error = %e, "Failed to write feed cache; continuing");
        }
    }
    Ok(articles)
}

async fn run_saved(args: &Cli, action: &SavedAction) -> Result<(), Box<dyn Error>> {
    let store = SavedStore::new(&args.saved_path);
    match action {
        SavedAction::List { format } => {
            let items = store.load().await.map_err(report_persistence)?;
            print!("{}", render_saved(&items, *format)?);
        }
        SavedAction::Add { feed_index, view } => {
            let articles = load_feed(args, false, &SystemClock).await?;
            let shown = feed_view(view).apply(&articles, &SystemClock);
            match shown.get(*feed_index) {
                Some(article) if !article.is_sentinel() => {
                    let item = SavedItem::from(*article);
                    let title = item.title.clone();
                    if store.save(item).await.map_err(report_persistence)? {
                        println!("Saved: {title} ({})", store.path().display());
                    } else {
                        println!("Already saved: {title}");
                    }
                }
                _ => println!("No article at index {feed_index} in this view."),
            }
        }
        SavedAction::Remove { index } => {
            let removed = match usize::try_from(*index) {
                Ok(index) => store.remove(index).await.map_err(report_persistence)?,
                Err(_) => None,
            };
            match removed {
                Some(item) => println!("Removed: {}", item.title),
                None => println!("No saved article at index {index}."),
            }
        }
    }
    Ok(())
}

/// Saved-items failures are told apart from ordinary errors: the file is left
/// as it was and the user needs to know which path to look at.
fn report_persistence(e: PersistenceError) -> Box<dyn Error> {
    eprintln!("Could not update saved articles: {e}");
    Box::new(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::FixedClock;
    use crate::models::Source;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_fresh_cache_is_judged_by_the_given_clock() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("cache.json");
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        let cached = vec![ArticleRecord {
            source: Source::AltNews,
            title: "Temple entry denied to Dalit family".to_string(),
            link: "https://www.altnews.in/1".to_string(),
            summary: String::new(),
            date: "2024-01-05".to_string(),
            content: String::new(),
        }];
        FeedCache::new(&cache_path, std::time::Duration::from_secs(3600))
            .store(&cached, clock.now())
            .await
            .unwrap();

        let args = Cli::parse_from([
            "caste_news",
            "--cache-path",
            cache_path.to_str().unwrap(),
            "feed",
        ]);
        // Real time is years past the snapshot; only the injected clock keeps it fresh.
        let articles = load_feed(&args, false, &clock).await.unwrap();
        assert_eq!(articles, cached);
    }
}
