//! Tiered candidate filter: exact, then similar, then flexible, then
//! unfiltered, stopping once enough candidates are kept.

use newsdesk_core::{Candidate, MatchTier, RankingParams, ScoredCandidate};

use crate::scorer::score;

fn sort_descending(items: &mut [ScoredCandidate]) {
    // `sort_by` is stable: equal scores keep extraction order.
    items.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
}

/// Selects and labels the relevant subset of `candidates`, best first.
///
/// Never returns an empty list when `candidates` is non-empty and
/// `params.min_results` is positive.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn filter_candidates(
    candidates: &[Candidate],
    keywords: &[String],
    topic: &str,
    params: &RankingParams,
) -> Vec<ScoredCandidate> {
    let lowered: Vec<String> = keywords
        .iter()
        .filter(|k| !k.trim().is_empty())
        .map(|k| k.to_lowercase())
        .collect();
    let has_topic = !topic.trim().is_empty();
    let similarity = |c: &Candidate| score(&c.searchable_text(), keywords, topic, &params.weights);

    let mut touched = vec![false; candidates.len()];
    let mut exact = Vec::new();
    let mut similar = Vec::new();

    for (i, candidate) in candidates.iter().enumerate() {
        let text = candidate.searchable_text().to_lowercase();
        let matching = lowered.iter().filter(|kw| text.contains(kw.as_str())).count();
        if matching > 0 {
            touched[i] = true;
            exact.push(ScoredCandidate::new(
                candidate.clone(),
                matching as f64 + params.exact_bonus,
                MatchTier::Exact,
            ));
        } else if has_topic {
            let s = similarity(candidate);
            if s > 0.0 {
                touched[i] = true;
                similar.push(ScoredCandidate::new(candidate.clone(), s, MatchTier::Similar));
            }
        }
    }

    if exact.len() >= params.min_results {
        sort_descending(&mut exact);
        tracing::debug!(exact = exact.len(), "exact tier sufficient");
        return exact;
    }

    let mut kept = exact;
    kept.append(&mut similar);
    sort_descending(&mut kept);
    if kept.len() >= params.min_results {
        return kept;
    }

    for (candidate, _) in candidates.iter().zip(&touched).filter(|(_, t)| !**t) {
        let s = similarity(candidate);
        if s > 0.0 {
            kept.push(ScoredCandidate::new(candidate.clone(), s, MatchTier::Flexible));
        }
    }
    sort_descending(&mut kept);

    if kept.is_empty() {
        tracing::debug!(
            available = candidates.len(),
            "no relevant candidates; returning unfiltered"
        );
        kept = candidates
            .iter()
            .take(params.min_results)
            .map(|c| ScoredCandidate::new(c.clone(), params.unfiltered_score, MatchTier::Unfiltered))
            .collect();
    }

    kept
}

/// Labels every candidate `unfiltered` with the nominal score. Used when a
/// source is scraped without a query.
#[must_use]
pub fn tag_unfiltered(candidates: Vec<Candidate>, params: &RankingParams) -> Vec<ScoredCandidate> {
    candidates
        .into_iter()
        .map(|c| ScoredCandidate::new(c, params.unfiltered_score, MatchTier::Unfiltered))
        .collect()
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
