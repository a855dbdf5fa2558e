use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::text::{char_len, visible_text};

const MIN_LINK_TEXT_CHARS: usize = 15;
const SKIP_HREF_MARKERS: &[&str] = &[
    "#",
    "javascript:",
    "mailto:",
    "tel:",
    "/tag/",
    "/category/",
    "/author/",
];

static ANCHORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct HarvestedLink {
    pub text: String,
    /// Raw href, not yet resolved.
    pub href: String,
}

/// Anchors that look like article links, in document order.
pub(super) fn harvest_links(html: &Html) -> Vec<HarvestedLink> {
    html.select(&ANCHORS)
        .filter_map(|a| {
            let href = a.value().attr("href")?.trim();
            if !(href.starts_with("http") || href.starts_with('/')) {
                return None;
            }
            let lower = href.to_lowercase();
            if SKIP_HREF_MARKERS.iter().any(|m| lower.contains(m)) {
                return None;
            }
            let text = visible_text(a);
            (char_len(&text) > MIN_LINK_TEXT_CHARS).then(|| HarvestedLink {
                text,
                href: href.to_string(),
            })
        })
        .collect()
}
