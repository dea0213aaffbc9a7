//! Compiled-in aggregator configuration.
//!
//! [`AggregatorConfig`] is built once at startup and handed by reference to
//! the relevance filter, the fetcher and every site adapter. Nothing mutates
//! it afterwards; the CLI only overrides the operational knobs (timeouts,
//! retries, worker bound) before it is frozen.

use crate::models::Source;
use std::collections::BTreeSet;
use std::time::Duration;

/// Browser-like User-Agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const KEYWORDS: &[&str] = &[
    "dalit",
    "caste",
    "atrocity",
    "reservation",
    "sc/st",
    "scheduled caste",
    "manual scavenging",
    "discrimination",
    "minority",
    "muslim",
    "women",
    "woman",
    "communal violence",
    "mob lynching",
    "caste violence",
    "untouchability",
    "hindu-muslim",
    "marginalized",
    "backward caste",
    "obc",
    "secularism",
    "religious minority",
    "dalit protest",
    "gangrape",
    "gang-rape",
    "sexual assault",
    "rape",
    "murder",
    "killing",
    "killing of dalit",
    "killing of muslim",
    "scheduled tribe",
    "girl",
    "girls",
    "sexual harassment",
    "beaten",
    "private parts",
    "genitals",
    "muslims",
    "rapes",
    "protest",
    "seat",
];

/// A syndication feed to poll.
#[derive(Debug, Clone)]
pub struct FeedSource {
    pub source: Source,
    pub url: String,
    /// Used to resolve relative entry links.
    pub base_url: String,
}

/// Where a listing adapter gets its candidate page from.
#[derive(Debug, Clone)]
pub enum ListingPage {
    /// `{prefix}{query}` where the query is the OR-joined keyword set.
    Search { prefix: String },
    /// A fixed section page with no query.
    Fixed { url: String },
}

/// Markup rules for one listing/search page.
#[derive(Debug, Clone)]
pub struct ListingSite {
    pub source: Source,
    pub base_url: String,
    pub page: ListingPage,
    /// Selector for one result card.
    pub card_selector: String,
    /// Selectors tried in order inside a card to find the title link. Empty
    /// means the card element is itself the link.
    pub title_selectors: Vec<String>,
    /// Selector for the excerpt inside a card.
    pub summary_selector: Option<String>,
    /// Take the title from the extracted article and the summary from the
    /// first characters of its body instead of from the card markup.
    pub details_from_article: bool,
}

/// Process-wide settings for one aggregation run.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub keywords: BTreeSet<String>,
    pub user_agent: String,
    pub feeds: Vec<FeedSource>,
    pub listings: Vec<ListingSite>,
    /// Entries considered per feed.
    pub feed_entry_cap: usize,
    /// Matched articles kept per listing page.
    pub listing_match_cap: usize,
    /// Characters of body text used as summary when a listing card has none.
    pub summary_from_content_chars: usize,
    /// Per-request network timeout.
    pub request_timeout: Duration,
    /// Wall-clock budget for one adapter invocation.
    pub adapter_timeout: Duration,
    /// Retries for retryable fetch failures.
    pub retries: usize,
    pub retry_base_delay: Duration,
    /// Concurrent adapters; `None` means one worker per adapter.
    pub max_workers: Option<usize>,
    /// Concurrent article downloads inside one feed adapter.
    pub article_concurrency: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            keywords: KEYWORDS.iter().map(|k| k.to_lowercase()).collect(),
            user_agent: USER_AGENT.to_string(),
            feeds: default_feeds(),
            listings: default_listings(),
            feed_entry_cap: 20,
            listing_match_cap: 10,
            summary_from_content_chars: 250,
            request_timeout: Duration::from_secs(10),
            adapter_timeout: Duration::from_secs(180),
            retries: 1,
            retry_base_delay: Duration::from_millis(500),
            max_workers: None,
            article_concurrency: 4,
        }
    }
}

impl AggregatorConfig {
    /// Number of adapters a full run invokes.
    pub fn adapter_count(&self) -> usize {
        self.feeds.len() + self.listings.len()
    }

    /// Size of the adapter worker pool: the configured cap, or one per adapter.
    pub fn worker_bound(&self) -> usize {
        self.max_workers
            .unwrap_or_else(|| self.adapter_count())
            .max(1)
    }
}

fn feed(source: Source, url: &str, base_url: &str) -> FeedSource {
    FeedSource {
        source,
        url: url.to_string(),
        base_url: base_url.to_string(),
    }
}

fn default_feeds() -> Vec<FeedSource> {
    vec![
        feed(
            Source::TheHindu,
            "https://www.thehindu.com/feeder/default.rss",
            "https://www.thehindu.com",
        ),
        feed(
            Source::IndianExpress,
            "https://indianexpress.com/feeder.rss",
            "https://indianexpress.com",
        ),
        feed(
            Source::ScrollIn,
            "https://scroll.in/feeder.rss",
            "https://scroll.in",
        ),
        feed(Source::TheWire, "https://thewire.in/rss", "https://thewire.in"),
        feed(
            Source::AltNews,
            "https://www.altnews.in/feed/",
            "https://www.altnews.in",
        ),
        feed(
            Source::Newslaundry,
            "https://www.newslaundry.com/feed",
            "https://www.newslaundry.com",
        ),
        feed(
            Source::TheQuint,
            "https://www.thequint.com/rss",
            "https://www.thequint.com",
        ),
        feed(
            Source::TelegraphIndia,
            "https://www.telegraphindia.com/feeds/rss.jsp?id=3",
            "https://www.telegraphindia.com",
        ),
        feed(
            Source::TheLallantop,
            "https://www.thelallantop.com/rss",
            "https://www.thelallantop.com",
        ),
    ]
}

fn default_listings() -> Vec<ListingSite> {
    vec![
        ListingSite {
            source: Source::TheHindu,
            base_url: "https://www.thehindu.com".to_string(),
            page: ListingPage::Search {
                prefix: "https://www.thehindu.com/search/?q=".to_string(),
            },
            card_selector: "div.story-card-news, div.other-card, .story-card".to_string(),
            title_selectors: vec!["h3 a".to_string(), "a[data-section]".to_string()],
            summary_selector: Some(".excerpt".to_string()),
            details_from_article: false,
        },
        ListingSite {
            source: Source::IndianExpress,
            base_url: "https://www.indianexpress.com".to_string(),
            page: ListingPage::Search {
                prefix: "https://www.indianexpress.com/search/?q=".to_string(),
            },
            card_selector: ".search-details".to_string(),
            title_selectors: vec!["a".to_string()],
            summary_selector: Some("p".to_string()),
            details_from_article: false,
        },
        ListingSite {
            source: Source::ScrollIn,
            base_url: "https://www.scroll.in".to_string(),
            page: ListingPage::Search {
                prefix: "https://www.scroll.in/search/?q=".to_string(),
            },
            card_selector: ".story-card".to_string(),
            title_selectors: vec!["h3 a".to_string()],
            summary_selector: Some(".excerpt".to_string()),
            details_from_article: false,
        },
        ListingSite {
            source: Source::Article14,
            base_url: "https://article-14.com".to_string(),
            page: ListingPage::Fixed {
                url: "https://article-14.com/news".to_string(),
            },
            card_selector: "a.news-card".to_string(),
            title_selectors: Vec::new(),
            summary_selector: None,
            details_from_article: true,
        },
    ]
}
