//! Full themed search: scrape every source, then aggregate.

use newsdesk_core::{AppConfig, RankingParams, SearchQuery, SearchResult, SourceList, ThrottleConfig};
use newsdesk_scraper::PageSource;

use crate::orchestrator::scrape_all_sources;
use crate::report::build_search_result;

/// Run-level knobs that do not belong to ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub throttle: ThrottleConfig,
    pub content_max_chars: usize,
}

impl SearchSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            throttle: config.throttle.clone(),
            content_max_chars: config.content_max_chars,
        }
    }
}

/// Runs a complete search for `query` over `sources`.
///
/// Individual source and content failures are recorded in the result, never
/// returned as errors.
pub async fn run_search<P: PageSource>(
    pages: &mut P,
    sources: &SourceList,
    query: &SearchQuery,
    params: &RankingParams,
    settings: &SearchSettings,
) -> SearchResult {
    let reports = scrape_all_sources(pages, sources, Some(query), params, &settings.throttle).await;
    let successful = reports.iter().filter(|r| r.is_completed()).count();
    tracing::info!(
        topic = query.topic(),
        attempted = reports.len(),
        successful,
        "source scrape finished"
    );

    build_search_result(
        pages,
        query.topic(),
        reports,
        settings.content_max_chars,
        settings.throttle.content_fetch_delay(),
    )
    .await
}
