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
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.max_attempts, 3);
    assert_eq!(cfg.retry_backoff_secs, 2);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("YTUBEDATA_LOG_LEVEL", "debug");
    map.insert("YTUBEDATA_MAX_ATTEMPTS", "5");
    map.insert("YTUBEDATA_RETRY_BACKOFF_SECS", "0");
    map.insert("YTUBEDATA_BASE_URL", "http://127.0.0.1:9999/");
    let cfg = build_app_config(lookup_from_map(&map)).expect("overrides should be valid");
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.max_attempts, 5);
    assert_eq!(cfg.retry_backoff_secs, 0);
    assert_eq!(cfg.base_url, "http://127.0.0.1:9999");
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = HashMap::new();
    map.insert("YTUBEDATA_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "YTUBEDATA_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(YTUBEDATA_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_attempts() {
    let mut map = HashMap::new();
    map.insert("YTUBEDATA_MAX_ATTEMPTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "YTUBEDATA_MAX_ATTEMPTS"),
        "expected InvalidEnvVar(YTUBEDATA_MAX_ATTEMPTS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = HashMap::new();
    map.insert("YTUBEDATA_BASE_URL", "ftp://example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "YTUBEDATA_BASE_URL"),
        "expected InvalidEnvVar(YTUBEDATA_BASE_URL), got: {result:?}"
    );
}
