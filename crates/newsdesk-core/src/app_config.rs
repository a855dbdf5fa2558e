use std::path::PathBuf;
use std::time::Duration;

/// Delays applied around every network round trip.
///
/// All bounds are inclusive milliseconds. A `min` equal to its `max` yields a
/// fixed delay; zero everywhere disables throttling (tests do this).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrottleConfig {
    pub pre_fetch_delay_min_ms: u64,
    pub pre_fetch_delay_max_ms: u64,
    pub inter_source_delay_ms: u64,
    pub inter_source_jitter_min_ms: u64,
    pub inter_source_jitter_max_ms: u64,
    pub content_fetch_delay_ms: u64,
}

impl ThrottleConfig {
    /// No delays at all.
    #[must_use]
    pub fn none() -> Self {
        Self {
            pre_fetch_delay_min_ms: 0,
            pre_fetch_delay_max_ms: 0,
            inter_source_delay_ms: 0,
            inter_source_jitter_min_ms: 0,
            inter_source_jitter_max_ms: 0,
            content_fetch_delay_ms: 0,
        }
    }

    #[must_use]
    pub fn content_fetch_delay(&self) -> Duration {
        Duration::from_millis(self.content_fetch_delay_ms)
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            pre_fetch_delay_min_ms: 1_000,
            pre_fetch_delay_max_ms: 3_000,
            inter_source_delay_ms: 3_000,
            inter_source_jitter_min_ms: 500,
            inter_source_jitter_max_ms: 1_500,
            content_fetch_delay_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub sources_path: PathBuf,
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub min_body_bytes: usize,
    pub content_max_chars: usize,
    pub throttle: ThrottleConfig,
}
