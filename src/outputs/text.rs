//! Plain-text cards.

use crate::dates::parse_canonical;
use crate::models::{ArticleRecord, SavedItem};
use crate::utils::preview;

const SUMMARY_PREVIEW_CHARS: usize = 200;

fn display_date(date: &str) -> String {
    parse_canonical(date)
        .map(|d| d.format("%b %d, %Y").to_string())
        .unwrap_or_else(|| "Date not available".to_string())
}

pub fn feed(articles: &[&ArticleRecord], full: bool) -> String {
    if articles.is_empty() {
        return "No news articles found matching your criteria.\n".to_string();
    }

    let mut out = String::new();
    // The sentinel is a failure notice, not an article.
    if let [only] = articles {
        if only.is_sentinel() {
            out.push_str(&format!("!! {}: {}\n", only.title, only.summary));
            out.push_str("   Every source failed; check connectivity and try --refresh.\n");
            return out;
        }
    }

    out.push_str(&format!("Latest News ({} articles)\n\n", articles.len()));
    for (i, a) in articles.iter().enumerate() {
        out.push_str(&format!("[{i}] {}\n", a.title));
        out.push_str(&format!("    {} · {}\n", a.source, display_date(&a.date)));
        if !a.summary.is_empty() {
            out.push_str(&format!("    {}\n", preview(&a.summary, SUMMARY_PREVIEW_CHARS)));
        }
        out.push_str(&format!("    {}\n", a.link));
        if full {
            let content = if a.content.is_empty() {
                "Content not available"
            } else {
                a.content.as_str()
            };
            for line in content.lines() {
                out.push_str(&format!("      {line}\n"));
            }
        }
        out.push('\n');
    }
    out
}

pub fn saved(items: &[SavedItem]) -> String {
    if items.is_empty() {
        return "No saved articles yet.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("Saved News ({} articles)\n\n", items.len()));
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("[{i}] {}\n", item.title));
        out.push_str(&format!("    {} · {}\n", item.source, display_date(&item.date)));
        if !item.summary.is_empty() {
            out.push_str(&format!("    {}\n", preview(&item.summary, SUMMARY_PREVIEW_CHARS)));
        }
        out.push_str(&format!("    {}\n\n", item.link));
    }
    out
}
