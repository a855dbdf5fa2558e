use thiserror::Error;

/// Why a page could not be turned into a document.
///
/// Every variant is recoverable: callers collapse them to "no document" and
/// move on to the next page or source.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("robots.txt disallows {url}")]
    AccessDenied { url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("connection failed for {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("timed out waiting for {url}")]
    Timeout { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("degenerate content from {url}: {len} bytes")]
    Degenerate { url: String, len: usize },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ScraperError {
    /// Short label used as a structured log field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ScraperError::AccessDenied { .. } => "access_denied",
            ScraperError::InvalidUrl { .. } => "invalid_url",
            ScraperError::Connect { .. } => "connect",
            ScraperError::Timeout { .. } => "timeout",
            ScraperError::UnexpectedStatus { .. } => "http_status",
            ScraperError::Degenerate { .. } => "degenerate_content",
            ScraperError::Http(_) => "http",
        }
    }
}
