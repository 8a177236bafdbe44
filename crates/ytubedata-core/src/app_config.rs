/// Desktop browser identification sent with every request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Total attempts per primary extraction call, including the first.
    pub max_attempts: u32,
    /// Fixed delay between primary attempts.
    pub retry_backoff_secs: u64,
    pub user_agent: String,
    /// Origin for both the Innertube API and the public watch/channel pages.
    pub base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            request_timeout_secs: 30,
            max_attempts: 3,
            retry_backoff_secs: 2,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}
