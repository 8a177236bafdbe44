use crate::app_config::{AppConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
/// Every variable is optional.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("YTUBEDATA_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("YTUBEDATA_REQUEST_TIMEOUT_SECS", "30")?;
    let max_attempts = parse_u32("YTUBEDATA_MAX_ATTEMPTS", "3")?;
    let retry_backoff_secs = parse_u64("YTUBEDATA_RETRY_BACKOFF_SECS", "2")?;
    let user_agent = or_default("YTUBEDATA_USER_AGENT", DEFAULT_USER_AGENT);
    let base_url = or_default("YTUBEDATA_BASE_URL", DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_owned();

    if max_attempts == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "YTUBEDATA_MAX_ATTEMPTS".to_owned(),
            reason: "must be at least 1".to_owned(),
        });
    }

    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "YTUBEDATA_BASE_URL".to_owned(),
            reason: format!("\"{base_url}\" is not an http(s) URL"),
        });
    }

    Ok(AppConfig {
        log_level,
        request_timeout_secs,
        max_attempts,
        retry_backoff_secs,
        user_agent,
        base_url,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
