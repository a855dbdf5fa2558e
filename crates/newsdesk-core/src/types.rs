//! Report data model shared by the extraction, ranking, and search crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An unranked article-like extraction from one page.
///
/// `url` is absolute and never empty; `title` has at least ten visible chars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub title: String,
    pub url: String,
    /// At most 300 chars.
    pub description: String,
    /// Absolute image URL, or empty.
    pub image: String,
    /// Free-form date string as published by the site, or empty.
    pub date: String,
}

impl Candidate {
    /// Minimal candidate built from a bare hyperlink.
    #[must_use]
    pub fn from_link(title: String, url: String) -> Self {
        Self {
            title,
            url,
            description: String::new(),
            image: String::new(),
            date: String::new(),
        }
    }

    /// The text the filter and scorer look at: title and description.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// Degradation level at which a candidate was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Exact,
    Similar,
    Flexible,
    Unfiltered,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchTier::Exact => write!(f, "exact"),
            MatchTier::Similar => write!(f, "similar"),
            MatchTier::Flexible => write!(f, "flexible"),
            MatchTier::Unfiltered => write!(f, "unfiltered"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub relevance_score: f64,
    pub match_tier: MatchTier,
}

impl ScoredCandidate {
    #[must_use]
    pub fn new(candidate: Candidate, relevance_score: f64, match_tier: MatchTier) -> Self {
        Self {
            candidate,
            relevance_score,
            match_tier,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Pending,
    Completed,
    Error,
}

impl std::fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceStatus::Pending => write!(f, "pending"),
            SourceStatus::Completed => write!(f, "completed"),
            SourceStatus::Error => write!(f, "error"),
        }
    }
}

/// Outcome of one fetch+extract+filter attempt against a configured source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReport {
    pub source_url: String,
    pub source_name: String,
    pub status: SourceStatus,
    /// Articles that survived filtering, before the per-source cap.
    pub article_count: usize,
    pub articles: Vec<ScoredCandidate>,
}

impl SourceReport {
    /// Placeholder for a source that has not been attempted yet.
    #[must_use]
    pub fn pending(source_url: &str, source_name: &str) -> Self {
        Self {
            status: SourceStatus::Pending,
            ..Self::failed(source_url, source_name)
        }
    }

    #[must_use]
    pub fn failed(source_url: &str, source_name: &str) -> Self {
        Self {
            source_url: source_url.to_string(),
            source_name: source_name.to_string(),
            status: SourceStatus::Error,
            article_count: 0,
            articles: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == SourceStatus::Completed
    }
}

/// A ranked, source-attributed, content-enriched article in the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub source_name: String,
    pub source_url: String,
    #[serde(flatten)]
    pub article: ScoredCandidate,
    /// Full article body text, empty when the second fetch failed.
    pub content: String,
    pub citation_long: String,
    pub citation_short: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedArticle {
    pub title: String,
    pub url: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceGroup {
    pub source_name: String,
    pub source_base_url: String,
    pub article_count: usize,
    pub articles: Vec<GroupedArticle>,
}

/// String extremes of the non-empty dates present. No date parsing happens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    pub most_recent_date_string: String,
    pub oldest_date_string: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub exact: usize,
    pub similar: usize,
    pub flexible: usize,
    pub unfiltered: usize,
}

impl TierCounts {
    pub fn record(&mut self, tier: MatchTier) {
        match tier {
            MatchTier::Exact => self.exact += 1,
            MatchTier::Similar => self.similar += 1,
            MatchTier::Flexible => self.flexible += 1,
            MatchTier::Unfiltered => self.unfiltered += 1,
        }
    }
}

/// Attribution reminder carried with every report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageNotice {
    pub message: String,
    pub ai_usage: String,
    /// URLs of the sources that completed.
    pub sources: Vec<String>,
}

impl UsageNotice {
    #[must_use]
    pub fn for_sources(sources: Vec<String>) -> Self {
        Self {
            message: "Content must be used in accordance with copyright and each site's terms of service".to_string(),
            ai_usage: "When used to draft articles with AI assistance, always cite the original sources via citationLong or citationShort".to_string(),
            sources,
        }
    }
}

/// Guidance for whoever writes a story from the findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorialNote {
    pub instructions: String,
    /// How many distinct outlets are available to cross-check a story.
    pub cross_verification: String,
    pub citation: String,
    pub temporal_context: String,
    pub perspectives: Vec<String>,
}

impl EditorialNote {
    #[must_use]
    pub fn new(perspectives: Vec<String>, coverage: &Coverage) -> Self {
        Self {
            instructions: "Use this material to write a professional news article".to_string(),
            cross_verification: format!(
                "Consult multiple sources ({} distinct sources available)",
                perspectives.len()
            ),
            citation: "Always cite the original sources using citationLong or citationShort"
                .to_string(),
            temporal_context: format!(
                "Articles from {} to {}",
                coverage.oldest_date_string, coverage.most_recent_date_string
            ),
            perspectives,
        }
    }
}

/// The terminal aggregate of a themed search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub topic: String,
    pub timestamp: DateTime<Utc>,
    pub total_sources_consulted: usize,
    pub successful_sources: usize,
    pub total_findings: usize,
    /// Sorted descending by relevance score; ties keep source order.
    pub findings: Vec<Finding>,
    pub sources_grouped: Vec<SourceGroup>,
    pub per_source_detail: Vec<SourceReport>,
    pub coverage: Coverage,
    pub distinct_source_names: Vec<String>,
    pub tier_counts: TierCounts,
    pub usage_notice: UsageNotice,
    pub editorial_note: EditorialNote,
}
