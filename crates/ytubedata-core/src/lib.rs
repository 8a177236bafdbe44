pub mod app_config;
pub mod config;
pub mod format;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use format::{
    format_date, format_duration, format_number, format_size_mb, truncate_description, RawValue,
};
pub use types::{
    channel_url_for, or_unavailable, video_url_for, ChannelRecord, MetadataRecord, SizeMb,
    StreamDescriptor, VideoRecord, VideoSummary, FALLBACK_NOTE, UNAVAILABLE,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
