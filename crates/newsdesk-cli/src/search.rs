//! `search` command handler.

use std::path::{Path, PathBuf};

use anyhow::Context;
use newsdesk_core::{load_sources, AppConfig, SearchQuery};
use newsdesk_scraper::{FetcherSettings, PageFetcher};
use newsdesk_search::{run_search, SearchSettings};

use crate::output::{report_path, write_json_atomic};

/// Runs a full search and writes the report.
///
/// # Errors
///
/// Returns an error for an empty topic, an unreadable sources file, a client
/// that cannot be built, or a report that cannot be written. Source-level
/// failures are recorded in the report instead.
pub(crate) async fn run_search_command(
    config: &AppConfig,
    topic: &str,
    keywords: &[String],
    output: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let query = SearchQuery::new(topic, keywords)?;
    let sources_file = load_sources(&config.sources_path)
        .with_context(|| format!("failed to load {}", config.sources_path.display()))?;
    let mut fetcher = PageFetcher::new(FetcherSettings::from_app_config(config))
        .map_err(|e| anyhow::anyhow!("failed to build page fetcher: {e}"))?;

    tracing::info!(
        topic = query.topic(),
        keywords = ?query.keywords(),
        sources = sources_file.sources.len(),
        user_agent = %config.user_agent,
        "starting search"
    );

    let result = run_search(
        &mut fetcher,
        &sources_file.sources,
        &query,
        &sources_file.ranking,
        &SearchSettings::from_app_config(config),
    )
    .await;

    let path = output.map_or_else(
        || report_path(&config.output_dir, query.topic()),
        Path::to_path_buf,
    );
    write_json_atomic(&path, &result)?;

    println!(
        "{} findings from {}/{} sources written to {}",
        result.total_findings,
        result.successful_sources,
        result.total_sources_consulted,
        path.display()
    );
    println!("{}", result.usage_notice.message);
    println!("{}", result.usage_notice.ai_usage);
    println!("{}", result.editorial_note.cross_verification);
    Ok(path)
}
