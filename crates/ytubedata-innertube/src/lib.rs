//! Structured metadata client for the public `YouTube` Innertube API.
//!
//! [`MetadataClient`] is the seam the extractors depend on; [`InnertubeClient`]
//! is the production implementation.

pub mod client;
pub mod error;
pub mod types;
mod wire;

pub use client::{InnertubeClient, MetadataClient};
pub use error::ClientError;
pub use types::{ChannelDetails, RecentVideo, StreamInfo, VideoDetails};
