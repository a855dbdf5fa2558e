//! Turns per-source reports into the final search result.

use std::time::Duration;

use chrono::Utc;
use newsdesk_core::{
    Coverage, EditorialNote, Finding, GroupedArticle, SearchResult, SourceGroup, SourceReport, TierCounts,
    UsageNotice,
};
use newsdesk_scraper::{extract_article_content, PageSource};

/// Fetches body text for every article of every completed source.
///
/// Findings come out in source order, then article order. A failed content
/// fetch leaves `content` empty. `delay` separates consecutive fetches.
pub async fn collect_findings<P: PageSource>(
    pages: &mut P,
    reports: &[SourceReport],
    content_max_chars: usize,
    delay: Duration,
) -> Vec<Finding> {
    let total: usize = reports
        .iter()
        .filter(|r| r.is_completed())
        .map(|r| r.articles.len())
        .sum();
    if total > 0 {
        tracing::info!(articles = total, "fetching article content");
    }

    let mut findings = Vec::with_capacity(total);
    for report in reports.iter().filter(|r| r.is_completed()) {
        for article in &report.articles {
            if !findings.is_empty() && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let url = &article.candidate.url;
            tracing::debug!(source = %report.source_name, url = %url, tier = %article.match_tier, "fetching content");
            let content = match pages.fetch(url).await {
                Some(document) => extract_article_content(&document, content_max_chars),
                None => String::new(),
            };

            findings.push(Finding {
                source_name: report.source_name.clone(),
                source_url: report.source_url.clone(),
                citation_long: format!(
                    "{} - {} ({})",
                    report.source_name, article.candidate.title, url
                ),
                citation_short: report.source_name.clone(),
                article: article.clone(),
                content,
            });
        }
    }
    findings
}

/// Sorts findings and computes groups, coverage, tier counts, and the
/// editorial note.
///
/// Pure apart from the timestamp.
#[must_use]
pub fn summarize(topic: &str, reports: Vec<SourceReport>, mut findings: Vec<Finding>) -> SearchResult {
    findings.sort_by(|a, b| b.article.relevance_score.total_cmp(&a.article.relevance_score));

    let mut groups: Vec<SourceGroup> = Vec::new();
    let mut tier_counts = TierCounts::default();
    for finding in &findings {
        tier_counts.record(finding.article.match_tier);
        let entry = GroupedArticle {
            title: finding.article.candidate.title.clone(),
            url: finding.article.candidate.url.clone(),
            date: finding.article.candidate.date.clone(),
        };
        match groups.iter_mut().find(|g| g.source_name == finding.source_name) {
            Some(group) => {
                group.article_count += 1;
                group.articles.push(entry);
            }
            None => groups.push(SourceGroup {
                source_name: finding.source_name.clone(),
                source_base_url: finding.source_url.clone(),
                article_count: 1,
                articles: vec![entry],
            }),
        }
    }

    let dates = || {
        findings
            .iter()
            .map(|f| f.article.candidate.date.as_str())
            .filter(|d| !d.is_empty())
    };
    let coverage = Coverage {
        most_recent_date_string: dates().max().unwrap_or_default().to_string(),
        oldest_date_string: dates().min().unwrap_or_default().to_string(),
    };

    let completed: Vec<String> = reports
        .iter()
        .filter(|r| r.is_completed())
        .map(|r| r.source_url.clone())
        .collect();

    tracing::info!(
        exact = tier_counts.exact,
        similar = tier_counts.similar,
        flexible = tier_counts.flexible,
        unfiltered = tier_counts.unfiltered,
        "match tiers"
    );

    let distinct_source_names: Vec<String> =
        groups.iter().map(|g| g.source_name.clone()).collect();
    let editorial_note = EditorialNote::new(distinct_source_names.clone(), &coverage);

    SearchResult {
        topic: topic.to_string(),
        timestamp: Utc::now(),
        total_sources_consulted: reports.len(),
        successful_sources: completed.len(),
        total_findings: findings.len(),
        distinct_source_names,
        findings,
        sources_grouped: groups,
        per_source_detail: reports,
        coverage,
        tier_counts,
        usage_notice: UsageNotice::for_sources(completed),
        editorial_note,
    }
}

/// Enriches every surviving article with its body text and aggregates the
/// run into a [`SearchResult`].
pub async fn build_search_result<P: PageSource>(
    pages: &mut P,
    topic: &str,
    reports: Vec<SourceReport>,
    content_max_chars: usize,
    content_fetch_delay: Duration,
) -> SearchResult {
    let findings = collect_findings(pages, &reports, content_max_chars, content_fetch_delay).await;
    summarize(topic, reports, findings)
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
