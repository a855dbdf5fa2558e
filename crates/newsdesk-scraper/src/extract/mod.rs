//! Article-candidate extraction from pages of unknown structure.
//!
//! A pool of article-like elements is chosen by the first productive
//! [`strategies`] stage, each pooled element is turned into a [`Candidate`]
//! by [`fields`], and loose article links found by [`links`] are appended.

mod fields;
mod links;
mod strategies;

use std::collections::HashSet;

use newsdesk_core::{Candidate, RankingParams};

use crate::client::Document;

pub use strategies::PoolStrategy;

/// Caps applied to one extraction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractLimits {
    /// Pooled elements examined for full candidates.
    pub max_structural: usize,
    /// Harvested links appended after the structural pass.
    pub max_harvested: usize,
}

impl ExtractLimits {
    #[must_use]
    pub fn from_params(params: &RankingParams) -> Self {
        Self {
            max_structural: params.max_structural_candidates,
            max_harvested: params.max_harvested_links,
        }
    }
}

impl Default for ExtractLimits {
    fn default() -> Self {
        Self::from_params(&RankingParams::default())
    }
}

/// Extracts unranked candidates from `document`, resolving links against
/// `base_url`.
///
/// URLs are unique within the returned list. An element whose fields cannot
/// be derived is skipped; it never fails the page.
#[must_use]
pub fn extract_candidates(
    document: &Document,
    base_url: &str,
    limits: ExtractLimits,
) -> Vec<Candidate> {
    let html = document.html();
    let pool = strategies::candidate_pool(html);
    let harvested = links::harvest_links(html);

    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();

    for element in pool.into_iter().take(limits.max_structural) {
        let Some(candidate) = fields::derive_candidate(element, base_url) else {
            continue;
        };
        if seen.insert(candidate.url.clone()) {
            candidates.push(candidate);
        }
    }
    let structural = candidates.len();

    for link in harvested.into_iter().take(limits.max_harvested) {
        let Some(url) = crate::urls::resolve_url(base_url, &link.href) else {
            continue;
        };
        if seen.insert(url.clone()) {
            candidates.push(Candidate::from_link(link.text, url));
        }
    }

    tracing::debug!(
        url = document.url(),
        structural,
        harvested = candidates.len() - structural,
        "extracted candidates"
    );
    candidates
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
