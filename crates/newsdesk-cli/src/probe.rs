//! `probe` command handler.

use anyhow::Context;
use newsdesk_core::{load_sources, AppConfig, QueryError, SearchQuery};
use newsdesk_scraper::{FetcherSettings, PageFetcher};
use newsdesk_search::probe_source;

/// Query for a probe: themed when a topic is given, keyword-only when only
/// keywords are, none otherwise.
pub(crate) fn probe_query(
    topic: Option<&str>,
    keywords: &[String],
) -> Result<Option<SearchQuery>, QueryError> {
    match topic {
        Some(t) => SearchQuery::new(t, keywords).map(Some),
        None if keywords.iter().any(|k| !k.trim().is_empty()) => {
            SearchQuery::keywords_only(keywords).map(Some)
        }
        None => Ok(None),
    }
}

pub(crate) async fn run_probe_command(
    config: &AppConfig,
    url: &str,
    topic: Option<&str>,
    keywords: &[String],
) -> anyhow::Result<()> {
    let query = probe_query(topic, keywords)?;
    let ranking = load_sources(&config.sources_path)
        .with_context(|| format!("failed to load {}", config.sources_path.display()))?
        .ranking;
    let mut fetcher = PageFetcher::new(FetcherSettings::from_app_config(config))
        .map_err(|e| anyhow::anyhow!("failed to build page fetcher: {e}"))?;

    let report = probe_source(&mut fetcher, url, query.as_ref(), &ranking).await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
