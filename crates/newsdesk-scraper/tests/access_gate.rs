//! Integration tests for `AccessGate` against a local robots.txt server.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use newsdesk_scraper::AccessGate;

const UA: &str = "newsdesk-test/1.0";

fn gate() -> AccessGate {
    let client = reqwest::Client::builder()
        .user_agent(UA)
        .build()
        .expect("failed to build test client");
    AccessGate::new(client, UA)
}

#[tokio::test]
async fn missing_robots_file_allows_everything() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut gate = gate();
    assert!(gate.allowed(&format!("{}/any/page", server.uri())).await);
    assert_eq!(gate.cache().len(), 1);
}

#[tokio::test]
async fn forbidden_robots_file_also_fails_open() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let mut gate = gate();
    assert!(gate.allowed(&format!("{}/news/", server.uri())).await);
}

#[tokio::test]
async fn disallow_rule_blocks_matching_paths_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private/\n"),
        )
        .mount(&server)
        .await;

    let mut gate = gate();
    assert!(!gate.allowed(&format!("{}/private/report", server.uri())).await);
    assert!(gate.allowed(&format!("{}/public/report", server.uri())).await);
}

#[tokio::test]
async fn robots_file_is_fetched_once_per_origin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow:\n"))
        .expect(1)
        .mount(&server)
        .await;

    let mut gate = gate();
    for page in ["/a", "/b", "/c?q=1"] {
        assert!(gate.allowed(&format!("{}{page}", server.uri())).await);
    }
    assert_eq!(gate.cache().len(), 1);
    // `expect(1)` is verified when the server drops.
}

#[tokio::test]
async fn unreachable_origin_fails_open() {
    // Nothing listens on port 9 locally; the connection is refused.
    let mut gate = gate();
    assert!(gate.allowed("http://127.0.0.1:9/page").await);
}
