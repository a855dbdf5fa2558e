//! `sources` command handlers. Each edits the sources file in place.

use anyhow::Context;
use newsdesk_core::{load_sources, save_sources, AppConfig, SourcesFile};
use newsdesk_scraper::urls::source_display_name;

fn load(config: &AppConfig) -> anyhow::Result<SourcesFile> {
    load_sources(&config.sources_path)
        .with_context(|| format!("failed to load {}", config.sources_path.display()))
}

fn save(config: &AppConfig, file: &SourcesFile) -> anyhow::Result<()> {
    save_sources(&config.sources_path, file)
        .with_context(|| format!("failed to save {}", config.sources_path.display()))
}

pub(crate) fn list_sources(config: &AppConfig) -> anyhow::Result<()> {
    let file = load(config)?;
    for source in &file.sources {
        println!("{:<16} {}", source_display_name(&source.url), source.url);
    }
    println!("{} sources", file.sources.len());
    Ok(())
}

pub(crate) fn add_source(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let mut file = load(config)?;
    file.sources.add(url)?;
    save(config, &file)?;
    tracing::info!(url, total = file.sources.len(), "source added");
    println!("added {url}");
    Ok(())
}

pub(crate) fn remove_source(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let mut file = load(config)?;
    if !file.sources.remove(url) {
        anyhow::bail!("source {url} is not configured");
    }
    save(config, &file)?;
    tracing::info!(url, total = file.sources.len(), "source removed");
    println!("removed {url}");
    Ok(())
}

pub(crate) fn reset_sources(config: &AppConfig) -> anyhow::Result<()> {
    let mut file = load(config)?;
    file.sources.reset();
    save(config, &file)?;
    println!("restored {} default sources", file.sources.len());
    Ok(())
}
