use crate::app_config::{AppConfig, ThrottleConfig};
use crate::ConfigError;

/// Identifier sent as `User-Agent` and matched against robots.txt groups.
pub const DEFAULT_USER_AGENT: &str = "newsdesk/0.1 (+topic-news-search)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("NEWSDESK_LOG_LEVEL", "info");
    let sources_path = PathBuf::from(or_default(
        "NEWSDESK_SOURCES_PATH",
        "./config/sources.yaml",
    ));
    let output_dir = PathBuf::from(or_default("NEWSDESK_OUTPUT_DIR", "./results"));

    let user_agent = or_default("NEWSDESK_USER_AGENT", DEFAULT_USER_AGENT);
    if user_agent.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "NEWSDESK_USER_AGENT".to_string(),
            reason: "must be non-empty".to_string(),
        });
    }

    let request_timeout_secs = parse_u64("NEWSDESK_REQUEST_TIMEOUT_SECS", "20")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "NEWSDESK_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let min_body_bytes = parse_usize("NEWSDESK_MIN_BODY_BYTES", "100")?;
    let content_max_chars = parse_usize("NEWSDESK_CONTENT_MAX_CHARS", "10000")?;

    let throttle = ThrottleConfig {
        pre_fetch_delay_min_ms: parse_u64("NEWSDESK_PRE_FETCH_DELAY_MIN_MS", "1000")?,
        pre_fetch_delay_max_ms: parse_u64("NEWSDESK_PRE_FETCH_DELAY_MAX_MS", "3000")?,
        inter_source_delay_ms: parse_u64("NEWSDESK_INTER_SOURCE_DELAY_MS", "3000")?,
        inter_source_jitter_min_ms: parse_u64("NEWSDESK_INTER_SOURCE_JITTER_MIN_MS", "500")?,
        inter_source_jitter_max_ms: parse_u64("NEWSDESK_INTER_SOURCE_JITTER_MAX_MS", "1500")?,
        content_fetch_delay_ms: parse_u64("NEWSDESK_CONTENT_FETCH_DELAY_MS", "1000")?,
    };
    validate_throttle(&throttle)?;

    Ok(AppConfig {
        log_level,
        sources_path,
        output_dir,
        user_agent,
        request_timeout_secs,
        min_body_bytes,
        content_max_chars,
        throttle,
    })
}

fn validate_throttle(throttle: &ThrottleConfig) -> Result<(), ConfigError> {
    if throttle.pre_fetch_delay_min_ms > throttle.pre_fetch_delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "pre-fetch delay min ({}ms) exceeds max ({}ms)",
            throttle.pre_fetch_delay_min_ms, throttle.pre_fetch_delay_max_ms
        )));
    }
    if throttle.inter_source_jitter_min_ms > throttle.inter_source_jitter_max_ms {
        return Err(ConfigError::Validation(format!(
            "inter-source jitter min ({}ms) exceeds max ({}ms)",
            throttle.inter_source_jitter_min_ms, throttle.inter_source_jitter_max_ms
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
