//! Listing adapter: search or section pages scraped with per-site selectors.
//!
//! Search pages are queried with the whole keyword set OR-joined into one
//! query string. Result cards are read top to bottom; each candidate link is
//! downloaded and kept if relevant, until `listing_match_cap` matches.

use super::{AdapterContext, resolve_link};
use crate::config::{ListingPage, ListingSite};
use crate::error::{AdapterError, ParseError};
use crate::extract::fetch_article;
use crate::fetch::Fetcher;
use crate::models::ArticleRecord;
use crate::utils::{collapse_whitespace, take_chars};
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// A link found on the listing page, before its article is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub link: String,
    pub title: String,
    pub summary: String,
}

/// `kw1+OR+kw2+OR+...` with each keyword URL-escaped and spaces as `+`.
pub fn search_query(keywords: &BTreeSet<String>) -> String {
    keywords
        .iter()
        .map(|kw| urlencoding::encode(kw).replace("%20", "+"))
        .join("+OR+")
}

pub fn listing_url(site: &ListingSite, keywords: &BTreeSet<String>) -> String {
    match &site.page {
        ListingPage::Search { prefix } => format!("{prefix}{}", search_query(keywords)),
        ListingPage::Fixed { url } => url.clone(),
    }
}

fn selector(raw: &str) -> Result<Selector, ParseError> {
    Selector::parse(raw).map_err(|_| ParseError::Selector {
        selector: raw.to_string(),
    })
}

fn text_of(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

/// Read result cards off a listing page.
pub fn parse_candidates(site: &ListingSite, html: &str) -> Result<Vec<Candidate>, ParseError> {
    let card_selector = selector(&site.card_selector)?;
    let title_selectors = site
        .title_selectors
        .iter()
        .map(|s| selector(s))
        .collect::<Result<Vec<_>, _>>()?;
    let summary_selector = site.summary_selector.as_deref().map(selector).transpose()?;

    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    for card in document.select(&card_selector) {
        let anchor = if title_selectors.is_empty() {
            Some(card)
        } else {
            title_selectors
                .iter()
                .find_map(|sel| card.select(sel).next())
        };
        let Some(anchor) = anchor else {
            continue;
        };
        let Some(href) = anchor.value().attr("href").filter(|h| !h.trim().is_empty()) else {
            continue;
        };
        let link = match resolve_link(&site.base_url, href) {
            Ok(link) => link,
            Err(e) => {
                debug!(error = %e, "Skipping card with unusable link");
                continue;
            }
        };
        let summary = summary_selector
            .as_ref()
            .and_then(|sel| card.select(sel).next())
            .map(text_of)
            .unwrap_or_default();

        candidates.push(Candidate {
            link,
            title: text_of(anchor),
            summary,
        });
    }

    Ok(candidates)
}

#[instrument(level = "info", skip_all, fields(source = %site.source))]
pub async fn fetch_candidates<F: Fetcher>(
    fetcher: &F,
    ctx: AdapterContext<'_>,
    site: &ListingSite,
) -> Result<Vec<ArticleRecord>, AdapterError> {
    let url = listing_url(site, &ctx.config.keywords);
    let html = fetcher.get_text(&url).await?;
    let candidates = parse_candidates(site, &html)?;
    info!(candidates = candidates.len(), "Indexed listing page");

    let cap = ctx.config.listing_match_cap;
    let mut articles = Vec::new();
    for candidate in candidates {
        if articles.len() >= cap {
            break;
        }

        let article = match fetch_article(fetcher, &candidate.link).await {
            Ok(article) => article,
            Err(e) => {
                warn!(link = %candidate.link, error = %e, "Failed to parse listed article");
                continue;
            }
        };

        let (title, summary) = if site.details_from_article {
            (
                article.title.clone(),
                take_chars(&article.text, ctx.config.summary_from_content_chars).to_string(),
            )
        } else {
            (candidate.title, candidate.summary)
        };

        if !ctx.relevance.article_matches(&title, &summary, &article.text) {
            debug!(%title, "Not relevant");
            continue;
        }

        info!(%title, "Match found");
        articles.push(ArticleRecord {
            source: site.source,
            title,
            link: candidate.link,
            summary,
            date: article.published.unwrap_or_default(),
            content: article.text,
        });
    }

    info!(count = articles.len(), "Matched listing articles");
    Ok(articles)
}
