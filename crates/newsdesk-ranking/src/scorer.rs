//! Keyword/topic relevance scorer.
//!
//! The score is the sum of a fixed table of [`Signal`]s, each awarding points
//! from [`RelevanceWeights`], clamped to `weights.max_score`. Matching is by
//! substring on normalized text, so `"ia"` matches inside `"industria"`.

use std::collections::BTreeSet;

use newsdesk_core::RelevanceWeights;

/// Lower-cases `s` and replaces every char that is not a word char or
/// whitespace with a space.
#[must_use]
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Inputs prepared once per call and shared by every signal.
#[derive(Debug)]
struct Prepared {
    raw_len: usize,
    raw_lower: String,
    text: String,
    /// Lower-cased keywords as given, blanks removed.
    keywords_lower: Vec<String>,
    /// Normalized keywords, blanks removed.
    keywords: Vec<String>,
    topic_words: Vec<String>,
}

impl Prepared {
    fn new(text: &str, keywords: &[String], topic: &str, w: &RelevanceWeights) -> Self {
        let kept: Vec<&String> = keywords.iter().filter(|k| !k.trim().is_empty()).collect();
        Self {
            raw_len: char_len(text),
            raw_lower: text.to_lowercase(),
            text: normalize(text),
            keywords_lower: kept.iter().map(|k| k.to_lowercase()).collect(),
            keywords: kept.iter().map(|k| normalize(k)).collect(),
            topic_words: normalize(topic)
                .split_whitespace()
                .filter(|word| char_len(word) > w.topic_word_min_len)
                .map(str::to_string)
                .collect(),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }
}

/// One independent contribution to a relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// A keyword appears verbatim in the normalized text.
    ExactKeyword,
    /// Every significant word of a multi-word keyword appears.
    AllWordsKeyword,
    /// Most, but not all, significant words of a multi-word keyword appear.
    PartialWordsKeyword,
    /// A significant topic word appears.
    TopicWord,
    /// A distinct long keyword word appears.
    LooseWord,
    /// A keyword appears in a short, title-like raw text.
    TitleBonus,
}

impl Signal {
    pub const ALL: [Signal; 6] = [
        Signal::ExactKeyword,
        Signal::AllWordsKeyword,
        Signal::PartialWordsKeyword,
        Signal::TopicWord,
        Signal::LooseWord,
        Signal::TitleBonus,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Signal::ExactKeyword => "exact_keyword",
            Signal::AllWordsKeyword => "all_words_keyword",
            Signal::PartialWordsKeyword => "partial_words_keyword",
            Signal::TopicWord => "topic_word",
            Signal::LooseWord => "loose_word",
            Signal::TitleBonus => "title_bonus",
        }
    }

    /// Points this signal awards for `text`, before clamping.
    #[must_use]
    pub fn points(self, text: &str, keywords: &[String], topic: &str, w: &RelevanceWeights) -> f64 {
        self.award(&Prepared::new(text, keywords, topic, w), w)
    }

    #[allow(clippy::cast_precision_loss)]
    fn award(self, p: &Prepared, w: &RelevanceWeights) -> f64 {
        match self {
            Signal::ExactKeyword => p
                .keywords
                .iter()
                .filter(|kw| p.contains(kw))
                .map(|kw| w.exact_keyword_base + w.exact_keyword_per_char * char_len(kw) as f64)
                .sum(),
            Signal::AllWordsKeyword | Signal::PartialWordsKeyword => {
                let mut total = 0.0;
                for kw in &p.keywords {
                    let words: Vec<&str> = kw
                        .split_whitespace()
                        .filter(|word| char_len(word) > w.keyword_word_min_len)
                        .collect();
                    if words.len() < 2 {
                        continue;
                    }
                    let matched = words.iter().filter(|word| p.contains(word)).count();
                    let all = matched == words.len();
                    let partial = !all && matched as f64 > words.len() as f64 * w.partial_words_ratio;
                    total += match self {
                        Signal::AllWordsKeyword if all => w.all_words_keyword,
                        Signal::PartialWordsKeyword if partial => w.partial_words_keyword,
                        _ => 0.0,
                    };
                }
                total
            }
            Signal::TopicWord => {
                let hits = p.topic_words.iter().filter(|word| p.contains(word)).count();
                w.topic_word * hits as f64
            }
            Signal::LooseWord => {
                let words: BTreeSet<&str> = p
                    .keywords
                    .iter()
                    .flat_map(|kw| kw.split_whitespace())
                    .filter(|word| char_len(word) > w.loose_word_min_len)
                    .collect();
                let hits = words.into_iter().filter(|word| p.contains(word)).count();
                w.loose_word * hits as f64
            }
            Signal::TitleBonus => {
                if p.raw_len >= w.title_max_len {
                    return 0.0;
                }
                let hits = p
                    .keywords_lower
                    .iter()
                    .filter(|kw| p.raw_lower.contains(kw.as_str()))
                    .count();
                w.title_bonus * hits as f64
            }
        }
    }
}

/// Relevance of `text` to the keywords and topic, in `[0, weights.max_score]`.
///
/// Pure and deterministic. Blank keywords never score.
#[must_use]
pub fn score(text: &str, keywords: &[String], topic: &str, weights: &RelevanceWeights) -> f64 {
    let prepared = Prepared::new(text, keywords, topic, weights);
    let total: f64 = Signal::ALL
        .iter()
        .map(|signal| signal.award(&prepared, weights))
        .sum();
    total.clamp(0.0, weights.max_score)
}

#[cfg(test)]
#[path = "scorer_test.rs"]
mod tests;
