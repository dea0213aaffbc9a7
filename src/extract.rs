//! Generic article extraction.
//!
//! Given any news article page, pull out a headline, the body text and a
//! publish date without knowing the site's markup:
//!
//! - **Title**: `og:title`, else the first `<h1>`, else `<title>`
//! - **Date**: publish-time meta tags, `time[datetime]`, then JSON-LD
//!   `datePublished`
//! - **Body**: the main content node chosen by `readability`, rendered as
//!   one paragraph per `<p>`
//!
//! A page with no recognisable body (photo or video pages) still yields an
//! article with empty `text`.

use crate::dates::to_canonical;
use crate::error::{AdapterError, ExtractionError};
use crate::fetch::Fetcher;
use crate::utils::collapse_whitespace;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::io::Cursor;
use tracing::{debug, instrument};
use url::Url;

static OG_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static DATE_META: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(concat!(
        r#"meta[property="article:published_time"], "#,
        r#"meta[name="article:published_time"], "#,
        r#"meta[itemprop="datePublished"], "#,
        r#"meta[name="pubdate"], "#,
        r#"meta[name="publishdate"], "#,
        r#"meta[name="date"]"#
    ))
    .unwrap()
});
static TIME: Lazy<Selector> = Lazy::new(|| Selector::parse("time[datetime]").unwrap());
static JSON_LD: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());
static ANY_P: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// What the extractor recovered from one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub title: String,
    pub text: String,
    /// Canonical `YYYY-MM-DD`, when the page advertises one.
    pub published: Option<String>,
}

/// Download `url` and run [`extract_article`] on it.
#[instrument(level = "debug", skip(fetcher))]
pub async fn fetch_article<F: Fetcher>(
    fetcher: &F,
    url: &str,
) -> Result<ExtractedArticle, AdapterError> {
    let html = fetcher.get_text(url).await?;
    let article = extract_article(url, &html)?;
    debug!(
        chars = article.text.chars().count(),
        published = ?article.published,
        "Extracted article"
    );
    Ok(article)
}

pub fn extract_article(url: &str, html: &str) -> Result<ExtractedArticle, ExtractionError> {
    if !html.contains('<') {
        return Err(ExtractionError::NotHtml {
            url: url.to_string(),
        });
    }
    let base = Url::parse(url).map_err(|source| ExtractionError::Url {
        url: url.to_string(),
        source,
    })?;
    let document = Html::parse_document(html);

    Ok(ExtractedArticle {
        title: title(&document),
        text: body_text(&base, html),
        published: publish_date(&document),
    })
}

fn element_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

fn title(document: &Html) -> String {
    document
        .select(&OG_TITLE)
        .filter_map(|m| m.value().attr("content"))
        .map(collapse_whitespace)
        .find(|t| !t.is_empty())
        .or_else(|| {
            document
                .select(&H1)
                .map(element_text)
                .find(|t| !t.is_empty())
        })
        .or_else(|| document.select(&TITLE).map(element_text).next())
        .unwrap_or_default()
}

fn publish_date(document: &Html) -> Option<String> {
    document
        .select(&DATE_META)
        .filter_map(|m| m.value().attr("content"))
        .chain(document.select(&TIME).filter_map(|t| t.value().attr("datetime")))
        .find_map(to_canonical)
        .or_else(|| json_ld_date(document))
}

fn json_ld_date(document: &Html) -> Option<String> {
    document.select(&JSON_LD).find_map(|script| {
        let raw = script.text().collect::<String>();
        let json: serde_json::Value = serde_json::from_str(raw.trim()).ok()?;
        find_date_published(&json)
    })
}

/// `datePublished` may sit at the top level, inside an array, or in `@graph`.
fn find_date_published(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Object(obj) => obj
            .get("datePublished")
            .and_then(|d| d.as_str())
            .and_then(to_canonical)
            .or_else(|| obj.get("@graph").and_then(find_date_published)),
        serde_json::Value::Array(items) => items.iter().find_map(find_date_published),
        _ => None,
    }
}

/// Main content as blank-line separated paragraphs, or empty when the page
/// has none.
fn body_text(base: &Url, html: &str) -> String {
    let mut reader = Cursor::new(html.as_bytes());
    let product = match readability::extractor::extract(&mut reader, base) {
        Ok(product) => product,
        Err(e) => {
            debug!(url = %base, error = ?e, "No readable body");
            return String::new();
        }
    };

    let content = Html::parse_fragment(&product.content);
    let paragraphs: Vec<String> = content
        .select(&ANY_P)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect();
    if paragraphs.is_empty() {
        collapse_whitespace(&content.root_element().text().collect::<Vec<_>>().join(" "))
    } else {
        paragraphs.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StubFetcher;

    const PAGE: &str = r#"<!doctype html>
<html>
<head>
  <title>Fallback title | The Hindu</title>
  <meta property="og:title" content="Dalit students protest  hostel eviction">
  <meta property="article:published_time" content="2024-01-08T11:20:00+05:30">
</head>
<body>
  <nav><p>Home | National | International | Opinion | Sport | Business</p></nav>
  <article>
    <h1>Dalit students protest hostel eviction</h1>
    <p>Students from Scheduled Caste communities, many of them first-generation
       learners, staged a sit-in on Monday outside the administrative block.</p>
    <p>The university said the eviction notices, issued last week, would be
       reviewed by a committee, and that no student would be moved until then.</p>
  </article>
  <footer><p>Copyright The Hindu. All rights reserved. Terms of use apply.</p></footer>
</body>
</html>"#;

    #[test]
    fn test_extracts_title_body_and_date() {
        let article = extract_article("https://www.thehindu.com/news/1", PAGE).unwrap();
        assert_eq!(article.title, "Dalit students protest hostel eviction");
        assert!(article.text.contains("Scheduled Caste communities, many of them"));
        assert!(article.text.contains("reviewed by a committee"));
        assert!(article.text.contains("\n\n"));
        assert!(!article.text.contains("Copyright"));
        assert_eq!(article.published.as_deref(), Some("2024-01-08"));
    }

    #[test]
    fn test_falls_back_to_h1_title() {
        let html = r#"<html><body><h1> Plain page </h1>
            <p>This page has no article element, no metadata, but still carries a long paragraph.</p>
            </body></html>"#;
        let article = extract_article("https://example.com", html).unwrap();
        assert_eq!(article.title, "Plain page");
        assert_eq!(article.published, None);
    }

    #[test]
    fn test_json_ld_date_in_graph() {
        let html = r#"<html><head><script type="application/ld+json">
            {"@context": "https://schema.org", "@graph": [
                {"@type": "WebPage"},
                {"@type": "NewsArticle", "datePublished": "2024-01-03T06:00:00Z"}
            ]}</script></head>
            <body><p>Long enough paragraph text to count as the body of the article.</p></body></html>"#;
        let article = extract_article("https://example.com", html).unwrap();
        assert_eq!(article.published.as_deref(), Some("2024-01-03"));
    }

    #[test]
    fn test_page_without_body_still_extracts() {
        let html = r#"<html><head><meta property="og:title" content="Dalit groom attacked"></head>
            <body><figure><img src="a.jpg"></figure><p>Photo: PTI</p></body></html>"#;
        let article = extract_article("https://example.com/photo", html).unwrap();
        assert_eq!(article.title, "Dalit groom attacked");
    }

    #[test]
    fn test_non_html_is_an_error() {
        let err = extract_article("https://example.com/a", "{\"ok\": true}").unwrap_err();
        assert!(matches!(err, ExtractionError::NotHtml { .. }));
        let err = extract_article("not a url", "<p>x</p>").unwrap_err();
        assert!(matches!(err, ExtractionError::Url { .. }));
    }

    #[tokio::test]
    async fn test_fetch_article_propagates_fetch_errors() {
        let stub = StubFetcher::new().with_body("https://example.com/ok", PAGE);
        assert!(fetch_article(&stub, "https://example.com/ok").await.is_ok());
        let err = fetch_article(&stub, "https://example.com/missing")
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::Fetch(_)));
    }
}
