use super::*;

const BASE: &str = "https://news.example.com/";

fn page(body: &str) -> Document {
    Document::parse(BASE, &format!("<html><body>{body}</body></html>"))
}

#[test]
fn structural_candidates_come_first_then_harvested_links() {
    let doc = page(
        r#"<main>
            <article><h2><a href="/a">First headline about robots</a></h2></article>
            <article><h2><a href="/b">Second headline about chips</a></h2></article>
        </main>
        <footer><a href="/c">A third link that looks like a story</a>
        <a href="/a">Duplicate of the first headline link</a></footer>"#,
    );
    let candidates = extract_candidates(&doc, BASE, ExtractLimits::default());
    let urls: Vec<&str> = candidates.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(
        urls,
        [
            "https://news.example.com/a",
            "https://news.example.com/b",
            "https://news.example.com/c",
        ]
    );
    assert!(candidates[2].description.is_empty());
    assert_eq!(candidates[2].title, "A third link that looks like a story");
}

#[test]
fn duplicate_structural_urls_are_dropped() {
    let doc = page(
        r#"<article><h2><a href="/same">Same story shown twice here</a></h2></article>
           <article><h3><a href="/same">Same story shown twice again</a></h3></article>"#,
    );
    let candidates = extract_candidates(&doc, BASE, ExtractLimits::default());
    assert_eq!(candidates.len(), 1);
}

#[test]
fn limits_cap_both_passes() {
    let articles: String = (0..30)
        .map(|i| format!(r#"<article><h2><a href="/s{i}">Structural headline number {i}</a></h2></article>"#))
        .collect();
    let links: String = (0..30)
        .map(|i| format!(r#"<a href="/l{i}">Loose harvested headline {i}</a>"#))
        .collect();
    let doc = page(&format!("{articles}<nav>{links}</nav>"));

    let limits = ExtractLimits {
        max_structural: 4,
        max_harvested: 3,
    };
    let candidates = extract_candidates(&doc, BASE, limits);
    // The first harvested anchors are the structural ones already seen.
    assert_eq!(candidates.len(), 4);

    let defaults = extract_candidates(&doc, BASE, ExtractLimits::default());
    assert_eq!(defaults.len(), 20);
}

#[test]
fn page_without_structure_yields_only_links() {
    let doc = page(r#"<p>Intro</p><a href="https://elsewhere.org/x">An external story worth reading</a>"#);
    let candidates = extract_candidates(&doc, BASE, ExtractLimits::default());
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].url, "https://elsewhere.org/x");
}

#[test]
fn limits_follow_ranking_params() {
    let params = RankingParams {
        max_structural_candidates: 7,
        max_harvested_links: 2,
        ..RankingParams::default()
    };
    let limits = ExtractLimits::from_params(&params);
    assert_eq!(limits.max_structural, 7);
    assert_eq!(limits.max_harvested, 2);
}
