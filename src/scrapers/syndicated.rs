//! Feed adapter: RSS/Atom indexing plus full-article extraction.
//!
//! Only the first `feed_entry_cap` entries of a feed are looked at. Each
//! entry's link is downloaded and run through the generic extractor; up to
//! `article_concurrency` downloads run at once and results keep feed order.

use super::{AdapterContext, resolve_link};
use crate::config::FeedSource;
use crate::error::AdapterError;
use crate::extract::fetch_article;
use crate::feed::{FeedEntry, parse_feed};
use crate::fetch::Fetcher;
use crate::models::ArticleRecord;
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

#[instrument(level = "info", skip_all, fields(source = %feed.source, url = %feed.url))]
pub async fn fetch_candidates<F: Fetcher>(
    fetcher: &F,
    ctx: AdapterContext<'_>,
    feed: &FeedSource,
) -> Result<Vec<ArticleRecord>, AdapterError> {
    let xml = fetcher.get_text(&feed.url).await?;
    let entries = parse_feed(&feed.url, &xml).inspect_err(|_| {
        debug!(body = %truncate_for_log(&xml, 200), "Feed body did not parse");
    })?;
    info!(entries = entries.len(), "Parsed feed");

    let articles: Vec<ArticleRecord> = stream::iter(entries.into_iter().take(ctx.config.feed_entry_cap))
        .map(|entry| process_entry(fetcher, ctx, feed, entry))
        .buffered(ctx.config.article_concurrency.max(1))
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(count = articles.len(), "Matched feed articles");
    Ok(articles)
}

/// Turn one feed entry into a record, or `None` when it fails or is off-topic.
async fn process_entry<F: Fetcher>(
    fetcher: &F,
    ctx: AdapterContext<'_>,
    feed: &FeedSource,
    entry: FeedEntry,
) -> Option<ArticleRecord> {
    let Some(href) = entry.link.as_deref() else {
        warn!(title = %entry.title, "Feed entry has no link; skipping");
        return None;
    };
    let link = match resolve_link(&feed.base_url, href) {
        Ok(link) => link,
        Err(e) => {
            warn!(title = %entry.title, error = %e, "Unusable entry link; skipping");
            return None;
        }
    };

    let article = match fetch_article(fetcher, &link).await {
        Ok(article) => article,
        Err(e) => {
            warn!(title = %entry.title, %link, error = %e, "Article extraction failed; skipping");
            return None;
        }
    };

    let title = entry.title.trim();
    let summary = entry.summary.trim();
    if !ctx
        .relevance
        .article_matches(title, summary, &article.text)
    {
        debug!(%title, "Not relevant");
        return None;
    }

    let date = entry.published.clone().unwrap_or_default();

    info!(%title, %date, "Match found");
    Some(ArticleRecord {
        source: feed.source,
        title: title.to_string(),
        link,
        summary: summary.to_string(),
        date,
        content: article.text.trim().to_string(),
    })
}
