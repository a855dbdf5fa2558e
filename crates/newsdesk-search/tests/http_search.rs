//! Full search through the real `PageFetcher` against a local server.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use newsdesk_core::{RankingParams, SearchQuery, SourceList, ThrottleConfig};
use newsdesk_scraper::{FetcherSettings, PageFetcher};
use newsdesk_search::{run_search, SearchSettings};

fn html(body: &str) -> String {
    format!("<!doctype html><html><head><title>Local outlet</title></head><body>{body}</body></html>")
}

#[tokio::test]
async fn search_runs_end_to_end_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private/\n"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html(
            r#"<main>
                <article><h2><a href="/story-1">Robots sort parcels at record speed</a></h2>
                  <p>Logistics companies report a sharp rise in automated sorting.</p></article>
                <article><h2><a href="/private/story-2">Robots in the private members area</a></h2></article>
            </main>"#,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/story-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html(
            "<article><p>The new sorting robots handle ten thousand parcels an hour.</p></article>",
        )))
        .mount(&server)
        .await;

    let mut fetcher = PageFetcher::new(FetcherSettings {
        user_agent: "newsdesk-test/1.0".to_string(),
        timeout_secs: 5,
        min_body_bytes: 100,
        pre_fetch_delay_min_ms: 0,
        pre_fetch_delay_max_ms: 0,
    })
    .expect("failed to build test PageFetcher");

    let base = format!("{}/", server.uri());
    let sources = SourceList::from_urls([base.as_str()]);
    let query = SearchQuery::new("robots", ["robots"]).expect("valid query");
    let settings = SearchSettings {
        throttle: ThrottleConfig::none(),
        content_max_chars: 10_000,
    };

    let result = run_search(&mut fetcher, &sources, &query, &RankingParams::default(), &settings).await;

    assert_eq!(result.successful_sources, 1);
    assert_eq!(result.total_findings, 2);

    let story = result
        .findings
        .iter()
        .find(|f| f.article.candidate.url.ends_with("/story-1"))
        .expect("story-1 finding");
    assert_eq!(
        story.content,
        "The new sorting robots handle ten thousand parcels an hour."
    );
    assert_eq!(
        story.article.candidate.description,
        "Logistics companies report a sharp rise in automated sorting."
    );

    // Disallowed by robots.txt: listed, but its content was never fetched.
    let private = result
        .findings
        .iter()
        .find(|f| f.article.candidate.url.contains("/private/"))
        .expect("private finding");
    assert!(private.content.is_empty());
}
