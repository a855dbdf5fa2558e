use std::time::Duration;

use newsdesk_core::AppConfig;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use scraper::Html;

use crate::error::ScraperError;
use crate::robots::AccessGate;
use crate::throttle::jittered_delay;

/// A fetched page parsed into an HTML tree.
pub struct Document {
    url: String,
    html: Html,
}

impl Document {
    #[must_use]
    pub fn parse(url: &str, body: &str) -> Self {
        Self {
            url: url.to_string(),
            html: Html::parse_document(body),
        }
    }

    /// The URL the document was requested from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn html(&self) -> &Html {
        &self.html
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").field("url", &self.url).finish_non_exhaustive()
    }
}

/// Anything that can answer robots checks and hand back parsed pages.
///
/// Orchestration only talks to this trait so it can run against canned pages.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Whether robots rules permit fetching `url`.
    async fn allowed(&mut self, url: &str) -> bool;

    /// The parsed page, or `None` on any failure (already logged).
    async fn fetch(&mut self, url: &str) -> Option<Document>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherSettings {
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Bodies shorter than this are treated as degenerate.
    pub min_body_bytes: usize,
    pub pre_fetch_delay_min_ms: u64,
    pub pre_fetch_delay_max_ms: u64,
}

impl FetcherSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout_secs: config.request_timeout_secs,
            min_body_bytes: config.min_body_bytes,
            pre_fetch_delay_min_ms: config.throttle.pre_fetch_delay_min_ms,
            pre_fetch_delay_max_ms: config.throttle.pre_fetch_delay_max_ms,
        }
    }

    /// Drops the pre-fetch jitter.
    #[must_use]
    pub fn without_delay(mut self) -> Self {
        self.pre_fetch_delay_min_ms = 0;
        self.pre_fetch_delay_max_ms = 0;
        self
    }
}

/// Browser-like negotiation headers sent with every page request.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("es-ES,es;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    headers.insert(header::DNT, HeaderValue::from_static("1"));
    headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers
}

/// Polite HTTP page fetcher: robots check, jittered pre-delay, one GET.
///
/// No retries. Every failure is classified into a [`ScraperError`] by
/// [`PageFetcher::try_fetch`]; the [`PageSource`] impl collapses them to `None`.
#[derive(Debug)]
pub struct PageFetcher {
    client: Client,
    gate: AccessGate,
    settings: FetcherSettings,
}

impl PageFetcher {
    /// Creates a fetcher with its own robots cache.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(settings: FetcherSettings) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent.as_str())
            .default_headers(default_headers())
            .build()?;
        let gate = AccessGate::new(client.clone(), &settings.user_agent);
        Ok(Self {
            client,
            gate,
            settings,
        })
    }

    #[must_use]
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Fetches and parses `url`, reporting why it failed.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] when `url` is not an absolute http(s) URL.
    /// - [`ScraperError::AccessDenied`] when robots rules forbid it.
    /// - [`ScraperError::Timeout`] / [`ScraperError::Connect`] on transport failure.
    /// - [`ScraperError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ScraperError::Degenerate`] when the body is shorter than `min_body_bytes`.
    /// - [`ScraperError::Http`] when the body cannot be read.
    pub async fn try_fetch(&mut self, url: &str) -> Result<Document, ScraperError> {
        let parsed = Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        if !self.gate.allowed(url).await {
            return Err(ScraperError::AccessDenied {
                url: url.to_string(),
            });
        }

        let delay = jittered_delay(
            self.settings.pre_fetch_delay_min_ms,
            self.settings.pre_fetch_delay_max_ms,
        );
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let referer = format!("{}/", parsed.origin().ascii_serialization());
        let response = self
            .client
            .get(url)
            .header(header::REFERER, referer)
            .send()
            .await
            .map_err(|e| classify_send_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Decodes with the charset from Content-Type, falling back to UTF-8.
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ScraperError::Timeout {
                    url: url.to_string(),
                }
            } else {
                ScraperError::Http(e)
            }
        })?;
        if body.len() < self.settings.min_body_bytes {
            return Err(ScraperError::Degenerate {
                url: url.to_string(),
                len: body.len(),
            });
        }

        Ok(Document::parse(url, &body))
    }
}

fn classify_send_error(url: &str, e: reqwest::Error) -> ScraperError {
    if e.is_timeout() {
        ScraperError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        ScraperError::Connect {
            url: url.to_string(),
            source: e,
        }
    } else {
        ScraperError::Http(e)
    }
}

impl PageSource for PageFetcher {
    async fn allowed(&mut self, url: &str) -> bool {
        self.gate.allowed(url).await
    }

    async fn fetch(&mut self, url: &str) -> Option<Document> {
        match self.try_fetch(url).await {
            Ok(doc) => Some(doc),
            Err(ScraperError::AccessDenied { .. }) => {
                tracing::info!(url, "skipping page disallowed by robots.txt");
                None
            }
            Err(e) => {
                tracing::warn!(url, kind = e.kind(), error = %e, "page fetch failed");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
