//! Small string and filesystem helpers shared across the crate.
//!
//! - Truncation for log lines and display previews
//! - Whitespace collapsing and tag stripping for scraped text
//! - Plain-text rendering of escaped HTML feed fields
//! - Parent directory creation before persisting files

use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and the number
/// of bytes dropped.
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// First `max` characters of `s`, never splitting a code point.
pub fn take_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        None => s,
        Some((cut, _)) => &s[..cut],
    }
}

/// Display preview: the first `max` characters followed by `...` when the
/// text was longer.
pub fn preview(s: &str, max: usize) -> String {
    let head = take_chars(s, max);
    if head.len() < s.len() {
        format!("{head}...")
    } else {
        head.to_string()
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

/// Remove markup tags, keeping the text between them.
pub fn strip_tags(s: &str) -> String {
    TAG.replace_all(s, " ").into_owned()
}

/// Turn a feed field (possibly escaped HTML) into plain single-line text.
pub fn plain_text(raw: &str) -> String {
    let once = decode_html_entities(raw);
    collapse_whitespace(&decode_html_entities(&strip_tags(&once)))
}

/// Make sure the directory that will hold `path` exists.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).await?;
            debug!(dir = %dir.display(), "Parent directory ready");
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let s = "दलित अधिकार";
        assert_eq!(take_chars(s, 4), "दलित");
        assert!(truncate_for_log(s, 4).starts_with("दलित…"));
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 200), "short");
        assert_eq!(preview(&"x".repeat(201), 200), format!("{}...", "x".repeat(200)));
        assert_eq!(preview(&"x".repeat(200), 200), "x".repeat(200));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
    }

    #[test]
    fn test_plain_text_decodes_named_and_numeric_entities() {
        assert_eq!(
            plain_text("Caf&eacute; &laquo;Dalit&raquo; rights &ndash; &middot; report"),
            "Café «Dalit» rights – · report"
        );
        assert_eq!(plain_text("&#8216;x&#x2019; &amp; y"), "\u{2018}x\u{2019} & y");
    }

    #[test]
    fn test_plain_text_handles_escaped_html() {
        assert_eq!(
            plain_text("&lt;p&gt;Dalit   groups &amp;amp; allies&lt;/p&gt;"),
            "Dalit groups & allies"
        );
        assert_eq!(plain_text("<b>bold</b>text"), "bold text");
    }

    #[tokio::test]
    async fn test_ensure_parent_dir_creates_missing_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/deeper/saved.json");
        ensure_parent_dir(&path).await.unwrap();
        assert!(tmp.path().join("nested/deeper").is_dir());
        ensure_parent_dir(Path::new("saved.json")).await.unwrap();
    }
}
