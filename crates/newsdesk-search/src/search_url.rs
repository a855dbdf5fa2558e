use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;

/// Characters left unescaped in search terms: unreserved marks and `/`.
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Search path conventions keyed by a host substring. First match wins.
const DOMAIN_PATTERNS: &[(&str, &str)] = &[
    ("xataka", "?s="),
    ("genbeta", "?s="),
    ("infobae", "buscar?q="),
    ("techcrunch", "search?q="),
    ("theverge", "search?q="),
];

const DEFAULT_PATTERN: &str = "search?q=";

/// Best guess at the on-site search page of `base_url` for `query`.
///
/// Returns `None` for a blank query.
#[must_use]
pub fn guess_search_url(base_url: &str, query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let host = Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .unwrap_or_default();
    let pattern = DOMAIN_PATTERNS
        .iter()
        .find(|&&(needle, _)| host.contains(needle))
        .map_or(DEFAULT_PATTERN, |&(_, pattern)| pattern);

    let separator = if base_url.ends_with('/') { "" } else { "/" };
    let encoded = utf8_percent_encode(query, QUERY_ESCAPE);
    Some(format!("{base_url}{separator}{pattern}{encoded}"))
}
