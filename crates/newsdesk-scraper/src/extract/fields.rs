use std::sync::LazyLock;

use newsdesk_core::Candidate;
use scraper::{ElementRef, Selector};

use crate::text::{char_len, truncate_chars, visible_text};
use crate::urls::resolve_url;

const MIN_TITLE_CHARS: usize = 10;
const DESCRIPTION_MAX_CHARS: usize = 300;
const DATE_CLASS_KEYWORDS: &[&str] = &["date", "time", "published", "updated"];

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid field selector")
}

static HEADINGS: LazyLock<Vec<Selector>> =
    LazyLock::new(|| ["h1", "h2", "h3", "h4", "h5"].into_iter().map(selector).collect());
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static BLOCKS: LazyLock<Selector> = LazyLock::new(|| selector("p, div"));
static IMG: LazyLock<Selector> = LazyLock::new(|| selector("img"));
static TIME: LazyLock<Selector> = LazyLock::new(|| selector("time"));
static DATED: LazyLock<Selector> =
    LazyLock::new(|| selector("time[class], span[class], div[class]"));

/// Builds a candidate from one pooled element, or `None` to skip it.
pub(super) fn derive_candidate(element: ElementRef<'_>, base_url: &str) -> Option<Candidate> {
    let title = title_of(element)?;
    let url = link_of(element, base_url)?;
    Some(Candidate {
        title,
        url,
        description: description_of(element),
        image: image_of(element, base_url),
        date: date_of(element),
    })
}

fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn title_of(element: ElementRef<'_>) -> Option<String> {
    let heading = HEADINGS.iter().find_map(|sel| {
        element
            .select(sel)
            .next()
            .map(visible_text)
            .filter(|t| char_len(t) >= MIN_TITLE_CHARS)
    });

    let title = heading
        .or_else(|| {
            element
                .select(&LINK)
                .next()
                .map(visible_text)
                .filter(|t| char_len(t) >= MIN_TITLE_CHARS)
        })
        .or_else(|| {
            ["data-title", "aria-label", "title"]
                .into_iter()
                .find_map(|name| attr(element, name))
                .map(str::to_string)
        })?;

    (char_len(&title) >= MIN_TITLE_CHARS).then_some(title)
}

fn link_of(element: ElementRef<'_>, base_url: &str) -> Option<String> {
    let href = match element.select(&LINK).next() {
        Some(anchor) => anchor.value().attr("href"),
        None if element.value().name() == "a" => element.value().attr("href"),
        None => None,
    }?;
    resolve_url(base_url, href)
}

fn description_of(element: ElementRef<'_>) -> String {
    element
        .select(&BLOCKS)
        .take(3)
        .map(visible_text)
        .find(|t| {
            let len = char_len(t);
            len > 30 && len < 500
        })
        .or_else(|| {
            ["data-description", "data-summary"]
                .into_iter()
                .find_map(|name| attr(element, name))
                .map(str::to_string)
        })
        .map(|d| truncate_chars(&d, DESCRIPTION_MAX_CHARS))
        .unwrap_or_default()
}

fn image_of(element: ElementRef<'_>, base_url: &str) -> String {
    element
        .select(&IMG)
        .next()
        .and_then(|img| {
            ["src", "data-src", "data-lazy-src", "data-original"]
                .into_iter()
                .find_map(|name| attr(img, name))
        })
        .and_then(|src| resolve_url(base_url, src))
        .unwrap_or_default()
}

fn date_of(element: ElementRef<'_>) -> String {
    let from_time = element.select(&TIME).next().map(|time| {
        attr(time, "datetime").map_or_else(|| visible_text(time), str::to_string)
    });
    if let Some(date) = from_time.filter(|d| !d.is_empty()) {
        return date;
    }

    element
        .select(&DATED)
        .filter(|el| {
            let class = el.value().attr("class").unwrap_or_default().to_lowercase();
            DATE_CLASS_KEYWORDS.iter().any(|kw| class.contains(kw))
        })
        .map(|el| attr(el, "datetime").map_or_else(|| visible_text(el), str::to_string))
        .find(|d| !d.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const BASE: &str = "https://news.example.com/tech/";

    fn first<'a>(html: &'a Html, css: &str) -> ElementRef<'a> {
        html.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    #[test]
    fn derives_all_fields_from_rich_markup() {
        let html = Html::parse_fragment(
            r#"<article>
                <img data-src="/img/ai.jpg">
                <h2><a href="/2024/ai-chips">New AI chips reach the market</a></h2>
                <p>Short</p>
                <p>Manufacturers announced a new generation of accelerators this week.</p>
                <time datetime="2024-05-01T10:00:00Z">1 May</time>
            </article>"#,
        );
        let c = derive_candidate(first(&html, "article"), BASE).unwrap();
        assert_eq!(c.title, "New AI chips reach the market");
        assert_eq!(c.url, "https://news.example.com/2024/ai-chips");
        assert_eq!(
            c.description,
            "Manufacturers announced a new generation of accelerators this week."
        );
        assert_eq!(c.image, "https://news.example.com/img/ai.jpg");
        assert_eq!(c.date, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn short_heading_falls_back_to_link_text() {
        let html = Html::parse_fragment(
            r#"<div class="card"><h3>Tech</h3><a href="https://x.com/a">A longer link headline</a></div>"#,
        );
        let c = derive_candidate(first(&html, "div"), BASE).unwrap();
        assert_eq!(c.title, "A longer link headline");
        assert_eq!(c.url, "https://x.com/a");
    }

    #[test]
    fn attribute_title_used_when_text_is_short() {
        let html = Html::parse_fragment(
            r#"<li data-title="Attribute provided title"><a href="/x">Go</a></li>"#,
        );
        let c = derive_candidate(first(&html, "li"), BASE).unwrap();
        assert_eq!(c.title, "Attribute provided title");
    }

    #[test]
    fn rejects_short_titles_and_missing_links() {
        let short = Html::parse_fragment(r#"<article><a href="/x">Brief</a></article>"#);
        assert!(derive_candidate(first(&short, "article"), BASE).is_none());

        let no_link = Html::parse_fragment("<article><h2>A perfectly fine headline</h2></article>");
        assert!(derive_candidate(first(&no_link, "article"), BASE).is_none());

        let empty_href = Html::parse_fragment(
            r#"<article><h2>A perfectly fine headline</h2><a href="">x</a></article>"#,
        );
        assert!(derive_candidate(first(&empty_href, "article"), BASE).is_none());
    }

    #[test]
    fn anchor_element_links_to_itself() {
        let html = Html::parse_fragment(
            r#"<a class="story" href="/self"><h3>Self linking story card</h3></a>"#,
        );
        // The anchor has no `a[href]` descendant, so its own href is used.
        let c = derive_candidate(first(&html, "a"), BASE).unwrap();
        assert_eq!(c.url, "https://news.example.com/self");
    }

    #[test]
    fn description_from_attribute_is_truncated() {
        let long = "d".repeat(400);
        let html = Html::parse_fragment(&format!(
            r#"<article data-summary="{long}"><h2><a href="/y">Headline for summary</a></h2></article>"#
        ));
        let c = derive_candidate(first(&html, "article"), BASE).unwrap();
        assert_eq!(c.description.chars().count(), 300);
    }

    #[test]
    fn date_from_classed_span() {
        let html = Html::parse_fragment(
            r#"<article><h2><a href="/z">Another dated headline</a></h2>
               <span class="meta">by staff</span><span class="Published-At">2024-03-02</span></article>"#,
        );
        let c = derive_candidate(first(&html, "article"), BASE).unwrap();
        assert_eq!(c.date, "2024-03-02");
        assert!(c.image.is_empty());
    }
}
