//! Site adapters: one acquisition unit per configured outlet.
//!
//! Every adapter produces a finite, ordered list of relevant
//! [`ArticleRecord`]s and follows the same two-phase pattern:
//!
//! 1. **Indexing**: read the outlet's syndication feed or listing page to
//!    get candidate links
//! 2. **Fetching**: download each candidate, extract its body, and keep it
//!    only if the keyword filter matches title, summary or body
//!
//! # Adapter Shapes
//!
//! | Shape | Module | Input | Cap |
//! |-------|--------|-------|-----|
//! | Feed | [`syndicated`] | RSS/Atom feed URL | first 20 entries |
//! | Listing | [`listing`] | search or section page | 10 matched articles |
//!
//! Failures of a single entry or candidate are logged and skipped. Failures
//! of the index step come back as an [`AdapterError`]; the orchestrator
//! logs those and moves on.

pub mod listing;
pub mod syndicated;

use crate::config::{AggregatorConfig, FeedSource, ListingSite};
use crate::error::{AdapterError, ParseError};
use crate::fetch::Fetcher;
use crate::models::{ArticleRecord, Source};
use crate::relevance::RelevanceFilter;
use url::Url;

/// Shared, read-only state every adapter runs against.
#[derive(Debug, Clone, Copy)]
pub struct AdapterContext<'a> {
    pub config: &'a AggregatorConfig,
    pub relevance: &'a RelevanceFilter,
}

/// One configured acquisition unit.
#[derive(Debug, Clone, Copy)]
pub enum Adapter<'a> {
    Feed(&'a FeedSource),
    Listing(&'a ListingSite),
}

impl<'a> Adapter<'a> {
    /// Feed adapters in configuration order, then listing adapters.
    pub fn all(config: &'a AggregatorConfig) -> Vec<Adapter<'a>> {
        config
            .feeds
            .iter()
            .map(Adapter::Feed)
            .chain(config.listings.iter().map(Adapter::Listing))
            .collect()
    }

    pub fn source(&self) -> Source {
        match self {
            Adapter::Feed(feed) => feed.source,
            Adapter::Listing(site) => site.source,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Adapter::Feed(_) => "feed",
            Adapter::Listing(_) => "listing",
        }
    }

    pub async fn fetch_candidates<F: Fetcher>(
        &self,
        fetcher: &F,
        ctx: AdapterContext<'_>,
    ) -> Result<Vec<ArticleRecord>, AdapterError> {
        match self {
            Adapter::Feed(feed) => syndicated::fetch_candidates(fetcher, ctx, feed).await,
            Adapter::Listing(site) => listing::fetch_candidates(fetcher, ctx, site).await,
        }
    }
}

/// Resolve a possibly-relative href against the outlet's base URL.
pub(crate) fn resolve_link(base_url: &str, href: &str) -> Result<String, ParseError> {
    let to_error = |source| ParseError::Url {
        base: base_url.to_string(),
        href: href.to_string(),
        source,
    };
    let base = Url::parse(base_url).map_err(to_error)?;
    let resolved = base.join(href.trim()).map_err(to_error)?;
    Ok(resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapters_in_invocation_order() {
        let config = AggregatorConfig::default();
        let adapters = Adapter::all(&config);
        assert_eq!(adapters.len(), 13);
        assert!(adapters[..9].iter().all(|a| a.kind() == "feed"));
        assert!(adapters[9..].iter().all(|a| a.kind() == "listing"));
        assert_eq!(adapters[9].source(), Source::TheHindu);
        assert_eq!(adapters[12].source(), Source::Article14);
    }

    #[test]
    fn test_resolve_link() {
        assert_eq!(
            resolve_link("https://www.scroll.in", "/article/1/x").unwrap(),
            "https://www.scroll.in/article/1/x"
        );
        assert_eq!(
            resolve_link("https://www.scroll.in", "https://scroll.in/latest/2").unwrap(),
            "https://scroll.in/latest/2"
        );
        assert!(resolve_link("not a base", "/x").is_err());
    }
}
