use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

/// Structural hints for article containers, most specific first.
const ARTICLE_HINTS: &[&str] = &[
    "article",
    "[role=\"article\"]",
    ".article",
    ".post",
    ".entry",
    ".news-item",
    ".story",
    ".card",
    ".item",
    "[class*=\"article\"]",
    "[class*=\"post\"]",
    "[class*=\"card\"]",
    "[class*=\"item\"]",
    "[class*=\"news\"]",
    "[class*=\"story\"]",
    "[class*=\"entry\"]",
    "li[class*=\"article\"]",
    "li[class*=\"post\"]",
    "div[class*=\"article\"]",
    "div[class*=\"post\"]",
    "section article",
    "main article",
    ".content article",
    ".main article",
];

const CLASS_KEYWORDS: &[&str] = &["article", "post", "card", "item", "news", "story"];

const FALLBACK_LIMIT: usize = 30;

static HINT_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ARTICLE_HINTS
        .iter()
        .map(|hint| Selector::parse(hint).expect("valid article hint selector"))
        .collect()
});

static TAG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article, li").expect("valid tag selector"));

static CLASSED_DIV_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[class]").expect("valid div selector"));

/// One way of locating article-like elements on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolStrategy {
    /// Union of every structural hint, each element kept once.
    SelectorCascade,
    /// `article` and `li` elements in document order.
    TagFallback,
    /// `div` elements whose class mentions an article-ish keyword.
    ClassKeywordFallback,
}

/// Stages tried in order by [`candidate_pool`].
pub(crate) const STRATEGIES: [PoolStrategy; 3] = [
    PoolStrategy::SelectorCascade,
    PoolStrategy::TagFallback,
    PoolStrategy::ClassKeywordFallback,
];

impl PoolStrategy {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PoolStrategy::SelectorCascade => "selector_cascade",
            PoolStrategy::TagFallback => "tag_fallback",
            PoolStrategy::ClassKeywordFallback => "class_keyword_fallback",
        }
    }

    /// Smallest pool for which this stage counts as productive.
    #[must_use]
    pub fn min_yield(self) -> usize {
        match self {
            PoolStrategy::SelectorCascade => 1,
            PoolStrategy::TagFallback => 5,
            PoolStrategy::ClassKeywordFallback => 0,
        }
    }

    #[must_use]
    pub fn collect(self, html: &Html) -> Vec<ElementRef<'_>> {
        match self {
            PoolStrategy::SelectorCascade => {
                let mut seen = HashSet::new();
                HINT_SELECTORS
                    .iter()
                    .flat_map(|sel| html.select(sel))
                    .filter(|el| seen.insert(el.id()))
                    .collect()
            }
            PoolStrategy::TagFallback => html.select(&TAG_SELECTOR).take(FALLBACK_LIMIT).collect(),
            PoolStrategy::ClassKeywordFallback => html
                .select(&CLASSED_DIV_SELECTOR)
                .filter(|el| {
                    let class = el.value().attr("class").unwrap_or_default().to_lowercase();
                    CLASS_KEYWORDS.iter().any(|kw| class.contains(kw))
                })
                .take(FALLBACK_LIMIT)
                .collect(),
        }
    }
}

/// The pool from the first productive stage; the last stage is taken as-is.
pub(crate) fn candidate_pool(html: &Html) -> Vec<ElementRef<'_>> {
    let mut pool = Vec::new();
    for (i, strategy) in STRATEGIES.iter().enumerate() {
        pool = strategy.collect(html);
        let last = i + 1 == STRATEGIES.len();
        if last || pool.len() >= strategy.min_yield() {
            tracing::debug!(strategy = strategy.name(), pooled = pool.len(), "candidate pool chosen");
            break;
        }
    }
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{body}</body></html>"))
    }

    #[test]
    fn cascade_keeps_each_element_once() {
        // Matches `article`, `.card`, `[class*="card"]` and `main article`.
        let html = doc(r#"<main><article class="card">one</article></main><div class="post">two</div>"#);
        let pool = PoolStrategy::SelectorCascade.collect(&html);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].value().name(), "article");
        assert_eq!(pool[1].value().name(), "div");
    }

    #[test]
    fn cascade_wins_with_a_single_match() {
        let html = doc(r#"<ul><li>a</li><li>b</li></ul><section role="article">x</section>"#);
        let pool = candidate_pool(&html);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].value().name(), "section");
    }

    #[test]
    fn tag_fallback_needs_five_elements() {
        let five = doc("<ul><li>1</li><li>2</li><li>3</li><li>4</li><li>5</li></ul>");
        assert_eq!(candidate_pool(&five).len(), 5);

        let few = doc(r#"<ul><li>1</li><li>2</li></ul><div class="Headline-Block">h</div>"#);
        // Too few list items: falls through to the class keyword stage, which
        // finds nothing article-ish and is accepted empty.
        assert!(candidate_pool(&few).is_empty());
    }

    #[test]
    fn tag_fallback_is_capped() {
        let items: String = (0..40).map(|i| format!("<li>{i}</li>")).collect();
        let html = doc(&format!("<ul>{items}</ul>"));
        assert_eq!(PoolStrategy::TagFallback.collect(&html).len(), 30);
    }

    #[test]
    fn class_keyword_fallback_matches_case_insensitively() {
        let html = doc(r#"<div class="Feature">a</div><div class="bigSTORYbox">b</div><div>c</div>"#);
        let pool = PoolStrategy::ClassKeywordFallback.collect(&html);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].value().attr("class"), Some("bigSTORYbox"));
    }

    #[test]
    fn strategy_metadata() {
        assert_eq!(STRATEGIES[0].name(), "selector_cascade");
        assert_eq!(PoolStrategy::TagFallback.min_yield(), 5);
        assert_eq!(PoolStrategy::ClassKeywordFallback.min_yield(), 0);
    }
}
