mod output;
mod probe;
mod search;
mod sources;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "newsdesk-cli")]
#[command(about = "Themed news search across configured outlets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search every configured source and write a JSON report.
    Search {
        /// Topic of the search; also the fallback keyword.
        topic: String,
        /// Literal keywords; any of them marks an exact match.
        keywords: Vec<String>,
        /// Report path. Defaults to `search_<topic>.json` in the output dir.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Scrape a single outlet and say whether it is worth adding.
    Probe {
        url: String,
        #[arg(long)]
        topic: Option<String>,
        /// Comma-separated keywords.
        #[arg(long, value_delimiter = ',')]
        keywords: Vec<String>,
    },
    /// Manage the configured source list.
    Sources {
        #[command(subcommand)]
        command: SourcesCommands,
    },
}

#[derive(Debug, Subcommand)]
enum SourcesCommands {
    List,
    Add { url: String },
    Remove { url: String },
    /// Restore the built-in outlets.
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = newsdesk_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            topic,
            keywords,
            output,
        } => {
            // The report is only written once the run finishes, so an
            // interrupt leaves any existing file untouched.
            tokio::select! {
                result = search::run_search_command(&config, &topic, &keywords, output.as_deref()) => {
                    result?;
                }
                () = interrupted() => {
                    tracing::info!("search interrupted; no report written");
                }
            }
        }
        Commands::Probe {
            url,
            topic,
            keywords,
        } => probe::run_probe_command(&config, &url, topic.as_deref(), &keywords).await?,
        Commands::Sources { command } => match command {
            SourcesCommands::List => sources::list_sources(&config)?,
            SourcesCommands::Add { url } => sources::add_source(&config, &url)?,
            SourcesCommands::Remove { url } => sources::remove_source(&config, &url)?,
            SourcesCommands::Reset => sources::reset_sources(&config)?,
        },
    }

    Ok(())
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
