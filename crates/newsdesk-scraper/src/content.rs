//! Body-text extraction for a single article page.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::client::Document;
use crate::text::{char_len, truncate_chars};

const CONTENT_SELECTORS: &[&str] = &[
    "article",
    ".article-content",
    ".post-content",
    ".entry-content",
    ".article-body",
    ".content",
    "[class*=\"article-content\"]",
    "[class*=\"post-content\"]",
    "[class*=\"entry-content\"]",
    "main article",
    ".main-content article",
];

/// Subtrees whose text never counts as article content.
const NOISE_TAGS: &[&str] = &[
    "script", "style", "nav", "aside", "footer", "header", "iframe", "noscript",
];

const FALLBACK_CLASS_KEYWORDS: &[&str] = &["content", "article", "post"];

const MIN_BLOCK_CHARS: usize = 20;

static CONTENT: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    CONTENT_SELECTORS
        .iter()
        .map(|css| Selector::parse(css).expect("valid content selector"))
        .collect()
});

static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid body selector"));

/// Paragraph-like text of an article page, at most `max_chars` chars.
///
/// Tries each content selector's first match until one yields text, then
/// falls back to the first `main`/`article`/`div` in the body whose class
/// mentions content. Blocks are separated by blank lines. Returns an empty
/// string when nothing qualifies.
#[must_use]
pub fn extract_article_content(document: &Document, max_chars: usize) -> String {
    let html = document.html();

    let from_selectors = CONTENT.iter().find_map(|sel| {
        let root = html.select(sel).next()?;
        let text = block_text(root);
        (!text.is_empty()).then_some(text)
    });

    let text = from_selectors
        .or_else(|| {
            let body = html.select(&BODY).next()?;
            let main = first_content_container(body)?;
            let text = block_text(main);
            (!text.is_empty()).then_some(text)
        })
        .unwrap_or_default();

    truncate_chars(&text, max_chars)
}

fn is_noise(el: ElementRef<'_>) -> bool {
    NOISE_TAGS.contains(&el.value().name())
}

fn child_elements(el: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    el.children().filter_map(ElementRef::wrap)
}

/// First `main`/`article`/`div` in document order outside noise subtrees
/// whose class mentions a content keyword.
fn first_content_container(root: ElementRef<'_>) -> Option<ElementRef<'_>> {
    for child in child_elements(root) {
        if is_noise(child) {
            continue;
        }
        if matches!(child.value().name(), "main" | "article" | "div") {
            let class = child.value().attr("class").unwrap_or_default().to_lowercase();
            if FALLBACK_CLASS_KEYWORDS.iter().any(|kw| class.contains(kw)) {
                return Some(child);
            }
        }
        if let Some(found) = first_content_container(child) {
            return Some(found);
        }
    }
    None
}

/// Text of `el` with noise subtrees skipped, text nodes joined by spaces.
fn clean_text(el: ElementRef<'_>) -> String {
    fn walk(el: ElementRef<'_>, parts: &mut Vec<String>) {
        for node in el.children() {
            if let Some(child) = ElementRef::wrap(node) {
                if !is_noise(child) {
                    walk(child, parts);
                }
            } else if let Some(text) = node.value().as_text() {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
        }
    }

    let mut parts = Vec::new();
    walk(el, &mut parts);
    parts.join(" ")
}

fn has_block_descendant(el: ElementRef<'_>) -> bool {
    child_elements(el)
        .filter(|c| !is_noise(*c))
        .any(|c| matches!(c.value().name(), "p" | "div") || has_block_descendant(c))
}

/// Paragraphs and leaf divs longer than the minimum, joined by blank lines.
fn block_text(root: ElementRef<'_>) -> String {
    fn walk(el: ElementRef<'_>, blocks: &mut Vec<String>) {
        for child in child_elements(el) {
            if is_noise(child) {
                continue;
            }
            let name = child.value().name();
            let is_block = name == "p" || (name == "div" && !has_block_descendant(child));
            if is_block {
                let text = clean_text(child);
                if char_len(&text) > MIN_BLOCK_CHARS {
                    blocks.push(text);
                }
            } else {
                walk(child, blocks);
            }
        }
    }

    let mut blocks = Vec::new();
    walk(root, &mut blocks);
    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Document {
        Document::parse(
            "https://news.example.com/story",
            &format!("<html><body>{body}</body></html>"),
        )
    }

    #[test]
    fn collects_paragraphs_from_article() {
        let d = doc(
            r"<article>
                <header><p>Header paragraph that must be skipped</p></header>
                <p>The first paragraph carries enough words.</p>
                <p>Tiny</p>
                <script>var tracking = 'not content at all';</script>
                <p>The second paragraph also has <b>bold</b> text.</p>
            </article>",
        );
        assert_eq!(
            extract_article_content(&d, 10_000),
            "The first paragraph carries enough words.\n\nThe second paragraph also has bold text."
        );
    }

    #[test]
    fn noise_inside_paragraph_is_dropped() {
        let d = doc(
            r"<div class='entry-content'><p>Visible sentence long enough here<script>hidden()</script></p></div>",
        );
        assert_eq!(
            extract_article_content(&d, 10_000),
            "Visible sentence long enough here"
        );
    }

    #[test]
    fn skips_selector_without_text_and_tries_next() {
        let d = doc(
            r"<article><p>short</p></article>
              <div class='post-content'><div>Leaf division with plenty of text</div></div>",
        );
        assert_eq!(
            extract_article_content(&d, 10_000),
            "Leaf division with plenty of text"
        );
    }

    #[test]
    fn falls_back_to_classed_container_in_body() {
        let d = doc(
            r"<nav><div class='nav-post'>Navigation link text that is long</div></nav>
              <main class='site-main-Post'><p>Body paragraph found through the fallback.</p></main>",
        );
        assert_eq!(
            extract_article_content(&d, 10_000),
            "Body paragraph found through the fallback."
        );
    }

    #[test]
    fn truncates_to_max_chars() {
        let para = "palabra ".repeat(50);
        let d = doc(&format!("<article><p>{para}</p></article>"));
        assert_eq!(extract_article_content(&d, 25).chars().count(), 25);
    }

    #[test]
    fn empty_when_nothing_qualifies() {
        let d = doc("<p>hello</p>");
        assert_eq!(extract_article_content(&d, 10_000), "");
    }
}
