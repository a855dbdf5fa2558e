use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");

    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.sources_path.to_str(), Some("./config/sources.yaml"));
    assert_eq!(cfg.output_dir.to_str(), Some("./results"));
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.request_timeout_secs, 20);
    assert_eq!(cfg.min_body_bytes, 100);
    assert_eq!(cfg.content_max_chars, 10_000);
    assert_eq!(cfg.throttle, ThrottleConfig::default());
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("NEWSDESK_REQUEST_TIMEOUT_SECS", "45");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 45);
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("NEWSDESK_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSDESK_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(NEWSDESK_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("NEWSDESK_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn user_agent_override() {
    let mut map = HashMap::new();
    map.insert("NEWSDESK_USER_AGENT", "custom-bot/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-bot/2.0");
}

#[test]
fn blank_user_agent_is_rejected() {
    let mut map = HashMap::new();
    map.insert("NEWSDESK_USER_AGENT", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSDESK_USER_AGENT"),
        "got: {result:?}"
    );
}

#[test]
fn throttle_overrides_are_applied() {
    let mut map = HashMap::new();
    map.insert("NEWSDESK_PRE_FETCH_DELAY_MIN_MS", "0");
    map.insert("NEWSDESK_PRE_FETCH_DELAY_MAX_MS", "0");
    map.insert("NEWSDESK_INTER_SOURCE_DELAY_MS", "10");
    map.insert("NEWSDESK_CONTENT_FETCH_DELAY_MS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.throttle.pre_fetch_delay_min_ms, 0);
    assert_eq!(cfg.throttle.pre_fetch_delay_max_ms, 0);
    assert_eq!(cfg.throttle.inter_source_delay_ms, 10);
    assert_eq!(cfg.throttle.content_fetch_delay_ms, 5);
}

#[test]
fn inverted_pre_fetch_bounds_fail_validation() {
    let mut map = HashMap::new();
    map.insert("NEWSDESK_PRE_FETCH_DELAY_MIN_MS", "5000");
    map.insert("NEWSDESK_PRE_FETCH_DELAY_MAX_MS", "1000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::Validation(_))),
        "got: {result:?}"
    );
}

#[test]
fn inverted_jitter_bounds_fail_validation() {
    let mut map = HashMap::new();
    map.insert("NEWSDESK_INTER_SOURCE_JITTER_MIN_MS", "2000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn min_body_bytes_invalid() {
    let mut map = HashMap::new();
    map.insert("NEWSDESK_MIN_BODY_BYTES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSDESK_MIN_BODY_BYTES"),
        "got: {result:?}"
    );
}
