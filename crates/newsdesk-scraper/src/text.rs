use scraper::ElementRef;

/// Trimmed, non-empty text nodes of `el` joined by single spaces.
pub(crate) fn visible_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// First `max` chars of `s`.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
