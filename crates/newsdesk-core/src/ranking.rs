//! Tunable ranking parameters.
//!
//! The defaults are heuristic constants carried over unchanged. They are
//! adjustable through the `ranking:` section of the sources file; no value
//! here has a derivation beyond "works on the configured outlets".

use serde::{Deserialize, Serialize};

/// Point values and word-length thresholds for the relevance scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceWeights {
    /// Base award for a keyword found verbatim in the normalized text.
    pub exact_keyword_base: f64,
    /// Added per character of the matched normalized keyword.
    pub exact_keyword_per_char: f64,
    /// Multi-word keyword with every significant word present.
    pub all_words_keyword: f64,
    /// Multi-word keyword with more than `partial_words_ratio` of its words present.
    pub partial_words_keyword: f64,
    pub partial_words_ratio: f64,
    /// Keyword words must be longer than this to count towards the all/partial signals.
    pub keyword_word_min_len: usize,
    /// Per significant topic word present.
    pub topic_word: f64,
    /// Topic words must be longer than this to be significant.
    pub topic_word_min_len: usize,
    /// Per distinct keyword word present.
    pub loose_word: f64,
    /// Keyword words must be longer than this to earn `loose_word`.
    pub loose_word_min_len: usize,
    /// Per keyword present in a short (title-like) text.
    pub title_bonus: f64,
    /// Texts shorter than this many chars are treated as titles.
    pub title_max_len: usize,
    /// Upper bound of any score.
    pub max_score: f64,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            exact_keyword_base: 15.0,
            exact_keyword_per_char: 3.0,
            all_words_keyword: 12.0,
            partial_words_keyword: 8.0,
            partial_words_ratio: 0.7,
            keyword_word_min_len: 2,
            topic_word: 6.0,
            topic_word_min_len: 3,
            loose_word: 3.0,
            loose_word_min_len: 4,
            title_bonus: 5.0,
            title_max_len: 200,
            max_score: 200.0,
        }
    }
}

/// Thresholds and caps used by extraction, filtering, and orchestration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingParams {
    /// Minimum yield before the filter degrades to the next tier.
    pub min_results: usize,
    /// Articles kept per source after filtering.
    pub per_source_cap: usize,
    /// Below this many candidates the orchestrator also probes a search URL.
    pub search_probe_threshold: usize,
    /// Structural elements examined per page.
    pub max_structural_candidates: usize,
    /// Harvested links considered per page.
    pub max_harvested_links: usize,
    /// Offset that keeps exact matches above every other tier.
    pub exact_bonus: f64,
    /// Nominal score of unfiltered fallback results.
    pub unfiltered_score: f64,
    pub weights: RelevanceWeights,
}

impl Default for RankingParams {
    fn default() -> Self {
        Self {
            min_results: 5,
            per_source_cap: 15,
            search_probe_threshold: 10,
            max_structural_candidates: 20,
            max_harvested_links: 15,
            exact_bonus: 100.0,
            unfiltered_score: 1.0,
            weights: RelevanceWeights::default(),
        }
    }
}
