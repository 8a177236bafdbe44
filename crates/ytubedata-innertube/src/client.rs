//! HTTP client for the public Innertube endpoints.
//!
//! Wraps `reqwest` with Innertube request envelopes, status-to-error mapping,
//! and typed conversion of the player and browse responses.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use crate::error::ClientError;
use crate::types::{ChannelDetails, VideoDetails};
use crate::wire::{self, PlayerResponse};

const WEB_CLIENT_NAME: &str = "WEB";
const WEB_CLIENT_VERSION: &str = "2.20240726.00.00";
/// `params` value selecting the channel's "Videos" tab.
const VIDEOS_TAB_PARAMS: &str = "EgZ2aWRlb3PyBgQKAjoA";

/// Source of structured video and channel metadata.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// Fetches metadata for the video with the given identifier.
    async fn fetch_video(&self, video_id: &str) -> Result<VideoDetails, ClientError>;

    /// Fetches metadata and the first page of uploads for a channel URL.
    ///
    /// Accepts `/channel/ID`, `/c/NAME`, `/user/NAME`, and `@handle` URLs.
    async fn fetch_channel(&self, channel_url: &str) -> Result<ChannelDetails, ClientError>;
}

#[async_trait]
impl<T: MetadataClient + ?Sized> MetadataClient for Arc<T> {
    async fn fetch_video(&self, video_id: &str) -> Result<VideoDetails, ClientError> {
        (**self).fetch_video(video_id).await
    }

    async fn fetch_channel(&self, channel_url: &str) -> Result<ChannelDetails, ClientError> {
        (**self).fetch_channel(channel_url).await
    }
}

/// Client for the Innertube `player`, `browse`, and `resolve_url` endpoints.
///
/// The origin is supplied by the caller: the configured production origin,
/// or a mock server in tests.
pub struct InnertubeClient {
    client: Client,
    base_url: String,
}

impl InnertubeClient {
    /// Creates a client for the given origin.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/youtubei/v1/{path}?prettyPrint=false", self.base_url)
    }

    fn envelope(extra: Value) -> Value {
        let mut body = json!({
            "context": {
                "client": {
                    "clientName": WEB_CLIENT_NAME,
                    "clientVersion": WEB_CLIENT_VERSION,
                    "hl": "en",
                    "gl": "US"
                }
            }
        });
        if let (Some(target), Value::Object(fields)) = (body.as_object_mut(), extra) {
            target.extend(fields);
        }
        body
    }

    /// POSTs an Innertube request and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// - [`ClientError::ContentUnavailable`] on 404.
    /// - [`ClientError::MalformedReference`] on 400.
    /// - [`ClientError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not JSON.
    async fn post(&self, path: &str, extra: Value) -> Result<Value, ClientError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "innertube request");
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .json(&Self::envelope(extra))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::ContentUnavailable(format!(
                "{path} returned 404"
            )));
        }
        if status == StatusCode::BAD_REQUEST {
            return Err(ClientError::MalformedReference(format!(
                "{path} rejected the request (400)"
            )));
        }
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: path.to_owned(),
            source: e,
        })
    }

    /// Resolves a channel URL to its `UC…` browse id.
    async fn resolve_channel_id(&self, channel_url: &str) -> Result<String, ClientError> {
        if let Some(id) = channel_id_in_path(channel_url) {
            return Ok(id);
        }
        let body = self
            .post("navigation/resolve_url", json!({ "url": channel_url }))
            .await?;
        wire::browse_id_from_resolve(&body).ok_or_else(|| {
            ClientError::ContentUnavailable(format!("could not resolve channel {channel_url}"))
        })
    }
}

#[async_trait]
impl MetadataClient for InnertubeClient {
    async fn fetch_video(&self, video_id: &str) -> Result<VideoDetails, ClientError> {
        let body = self.post("player", json!({ "videoId": video_id })).await?;
        let response: PlayerResponse =
            serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
                context: format!("player(videoId={video_id})"),
                source: e,
            })?;
        wire::video_from_player(video_id, response)
    }

    async fn fetch_channel(&self, channel_url: &str) -> Result<ChannelDetails, ClientError> {
        let browse_id = self.resolve_channel_id(channel_url).await?;
        let body = self
            .post(
                "browse",
                json!({ "browseId": browse_id, "params": VIDEOS_TAB_PARAMS }),
            )
            .await?;
        wire::channel_from_browse(&browse_id, &body)
    }
}

/// Returns the id segment of a `/channel/ID` URL.
fn channel_id_in_path(url: &str) -> Option<String> {
    let rest = url.split("/channel/").nth(1)?;
    let id = rest.split(['/', '?', '#']).next()?;
    (!id.is_empty()).then(|| id.to_owned())
}
