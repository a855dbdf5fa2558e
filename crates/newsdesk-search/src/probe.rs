//! Single-outlet evaluation used before adding a source to the list.

use newsdesk_core::{MatchTier, RankingParams, SearchQuery, SourceReport};
use newsdesk_scraper::urls::source_display_name;
use newsdesk_scraper::PageSource;
use serde::Serialize;

use crate::orchestrator::{build_report, gather_candidates};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Reachable, permitted, and yields relevant articles.
    Add,
    /// Works, but nothing matched the query better than `flexible`.
    AdjustQuery,
    /// Disallowed by robots.txt, unreachable, or no candidates at all.
    Reject,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::Add => write!(f, "add"),
            Recommendation::AdjustQuery => write!(f, "adjust_query"),
            Recommendation::Reject => write!(f, "reject"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    pub url: String,
    pub robots_allowed: bool,
    pub reachable: bool,
    pub report: SourceReport,
    pub recommendation: Recommendation,
}

fn recommend(robots_allowed: bool, report: &SourceReport, query: Option<&SearchQuery>) -> Recommendation {
    if !robots_allowed || !report.is_completed() {
        return Recommendation::Reject;
    }
    let relevant = report
        .articles
        .iter()
        .any(|a| matches!(a.match_tier, MatchTier::Exact | MatchTier::Similar));
    if query.is_some() && !relevant {
        Recommendation::AdjustQuery
    } else {
        Recommendation::Add
    }
}

/// Scrapes `url` once, as a search would, and judges whether it is worth
/// adding to the source list.
pub async fn probe_source<P: PageSource>(
    pages: &mut P,
    url: &str,
    query: Option<&SearchQuery>,
    params: &RankingParams,
) -> ProbeReport {
    let robots_allowed = pages.allowed(url).await;
    if !robots_allowed {
        tracing::info!(url, "probe stopped: robots.txt disallows access");
        return ProbeReport {
            url: url.to_string(),
            robots_allowed,
            reachable: false,
            report: SourceReport::failed(url, &source_display_name(url)),
            recommendation: Recommendation::Reject,
        };
    }

    let gathered = gather_candidates(pages, url, query, params).await;
    let report = build_report(url, gathered.candidates, query, params);
    let recommendation = recommend(robots_allowed, &report, query);
    tracing::info!(
        url,
        reachable = gathered.reachable,
        article_count = report.article_count,
        %recommendation,
        "probe finished"
    );

    ProbeReport {
        url: url.to_string(),
        robots_allowed,
        reachable: gathered.reachable,
        report,
        recommendation,
    }
}
