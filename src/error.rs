//! Error taxonomy for the acquisition pipeline and the saved-item store.
//!
//! Acquisition errors ([`FetchError`], [`ParseError`], [`ExtractionError`])
//! are always recovered where they happen: an adapter logs them and the unit
//! of work (one entry, one candidate, or one whole adapter) contributes
//! nothing. [`PersistenceError`] is the only error that reaches the caller.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure to obtain a response body from a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },
}

impl FetchError {
    /// Whether trying the same request again could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => *status >= 500,
            FetchError::Transport { .. } | FetchError::Timeout { .. } => true,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            FetchError::Status { url, .. }
            | FetchError::Transport { url, .. }
            | FetchError::Timeout { url } => url,
        }
    }

    pub(crate) fn from_reqwest(url: &str, e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = e.status() {
            FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    }
}

/// Markup, feed or URL content that does not have the expected shape.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed feed from {url}: {message}")]
    Feed { url: String, message: String },

    #[error("invalid selector `{selector}`")]
    Selector { selector: String },

    #[error("cannot resolve `{href}` against {base}: {source}")]
    Url {
        base: String,
        href: String,
        #[source]
        source: url::ParseError,
    },
}

/// Article body extraction failed for a specific link.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid article URL {url}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{url} did not return an HTML document")]
    NotHtml { url: String },
}

/// Anything that makes a whole adapter contribute nothing.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("adapter for {adapter} exceeded its {budget:?} budget")]
    Timeout { adapter: String, budget: Duration },
}

/// The saved-item file (or the feed cache file) could not be read or written.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A feed or saved-item listing could not be serialized for output.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("JSON rendering failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
