//! Shared data model and configuration for the newsdesk workspace.

pub mod app_config;
pub mod config;
pub mod query;
pub mod ranking;
pub mod sources;
pub mod types;

pub use app_config::{AppConfig, ThrottleConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use query::{QueryError, SearchQuery};
pub use ranking::{RankingParams, RelevanceWeights};
pub use sources::{load_sources, save_sources, SourceConfig, SourceList, SourcesFile};
pub use types::{
    Candidate, Coverage, EditorialNote, Finding, GroupedArticle, MatchTier, ScoredCandidate,
    SearchResult, SourceGroup, SourceReport, SourceStatus, TierCounts, UsageNotice,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sources file {path}: {source}")]
    SourcesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sources file: {0}")]
    SourcesFileParse(#[from] serde_yaml::Error),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}
