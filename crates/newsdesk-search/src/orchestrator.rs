//! Per-source scraping: gate, fetch, extract, optional on-site search, filter.

use std::collections::HashSet;

use newsdesk_core::{
    Candidate, RankingParams, SearchQuery, SourceList, SourceReport, SourceStatus, ThrottleConfig,
};
use newsdesk_ranking::{filter_candidates, tag_unfiltered};
use newsdesk_scraper::throttle::pause;
use newsdesk_scraper::urls::source_display_name;
use newsdesk_scraper::{extract_candidates, ExtractLimits, PageSource};

use crate::search_url::guess_search_url;

/// Candidates gathered from one source before filtering.
#[derive(Debug, Default)]
pub(crate) struct Gathered {
    /// Whether the main page produced a document.
    pub reachable: bool,
    pub candidates: Vec<Candidate>,
}

/// Fetches the main page and, when it yields too little for a query, one
/// guessed search page. Search results only add URLs not already seen.
pub(crate) async fn gather_candidates<P: PageSource>(
    pages: &mut P,
    url: &str,
    query: Option<&SearchQuery>,
    params: &RankingParams,
) -> Gathered {
    let limits = ExtractLimits::from_params(params);
    let mut gathered = Gathered::default();

    if let Some(document) = pages.fetch(url).await {
        gathered.reachable = true;
        gathered.candidates = extract_candidates(&document, url, limits);
    }

    let Some(query) = query else {
        return gathered;
    };
    if gathered.candidates.len() >= params.search_probe_threshold {
        return gathered;
    }
    let Some(search_url) = guess_search_url(url, &query.search_terms()) else {
        return gathered;
    };
    if search_url == url {
        return gathered;
    }

    tracing::info!(source = url, search_url = %search_url, "trying on-site search");
    if let Some(document) = pages.fetch(&search_url).await {
        let mut seen: HashSet<String> = gathered.candidates.iter().map(|c| c.url.clone()).collect();
        let before = gathered.candidates.len();
        for candidate in extract_candidates(&document, &search_url, limits) {
            if seen.insert(candidate.url.clone()) {
                gathered.candidates.push(candidate);
            }
        }
        tracing::debug!(
            source = url,
            added = gathered.candidates.len() - before,
            "merged search results"
        );
    }

    gathered
}

/// Filters gathered candidates into a source report.
pub(crate) fn build_report(
    url: &str,
    candidates: Vec<Candidate>,
    query: Option<&SearchQuery>,
    params: &RankingParams,
) -> SourceReport {
    let name = source_display_name(url);
    if candidates.is_empty() {
        return SourceReport::failed(url, &name);
    }

    let filtered = match query {
        Some(q) => filter_candidates(&candidates, q.keywords(), q.topic(), params),
        None => tag_unfiltered(candidates, params),
    };
    if filtered.is_empty() {
        return SourceReport::failed(url, &name);
    }

    let article_count = filtered.len();
    let articles = filtered.into_iter().take(params.per_source_cap).collect();
    SourceReport {
        source_url: url.to_string(),
        source_name: name,
        status: SourceStatus::Completed,
        article_count,
        articles,
    }
}

/// Scrapes one source. Never fails: problems yield an `error` report with
/// no articles.
pub async fn scrape_source<P: PageSource>(
    pages: &mut P,
    url: &str,
    query: Option<&SearchQuery>,
    params: &RankingParams,
) -> SourceReport {
    let gathered = gather_candidates(pages, url, query, params).await;
    build_report(url, gathered.candidates, query, params)
}

/// Scrapes every source in order, pausing between sources.
///
/// Every source starts as `pending` and is settled to `completed` or
/// `error` after its single attempt. One report per source, in list order. A failing source is logged and
/// recorded; the run always continues.
pub async fn scrape_all_sources<P: PageSource>(
    pages: &mut P,
    sources: &SourceList,
    query: Option<&SearchQuery>,
    params: &RankingParams,
    throttle: &ThrottleConfig,
) -> Vec<SourceReport> {
    let total = sources.len();
    tracing::info!(
        sources = total,
        topic = query.map(SearchQuery::topic).unwrap_or_default(),
        "starting source scrape"
    );

    let mut reports: Vec<SourceReport> = sources
        .iter()
        .map(|source| SourceReport::pending(&source.url, &source_display_name(&source.url)))
        .collect();
    for (i, source) in sources.iter().enumerate() {
        tracing::info!(position = i + 1, total, source = %source.url, "scraping source");

        let report = scrape_source(pages, &source.url, query, params).await;
        if report.is_completed() {
            tracing::info!(
                source = %source.url,
                article_count = report.article_count,
                "source completed"
            );
        } else {
            tracing::warn!(source = %source.url, "source yielded no candidates");
        }
        reports[i] = report;

        if i + 1 < total {
            pause(
                throttle.inter_source_delay_ms,
                throttle.inter_source_jitter_min_ms,
                throttle.inter_source_jitter_max_ms,
            )
            .await;
        }
    }

    reports
}
