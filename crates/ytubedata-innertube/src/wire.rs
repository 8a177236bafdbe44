//! Innertube response shapes and their conversion into public types.
//!
//! Only the fields the extractors consume are modelled; everything else in
//! the (very large) responses is ignored by serde.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::types::{ChannelDetails, RecentVideo, StreamInfo, VideoDetails};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerResponse {
    #[serde(default)]
    pub playability_status: Option<PlayabilityStatus>,
    #[serde(default)]
    pub video_details: Option<WireVideoDetails>,
    #[serde(default)]
    pub microformat: Option<Microformat>,
    #[serde(default)]
    pub streaming_data: Option<StreamingData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlayabilityStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireVideoDetails {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub length_seconds: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<ThumbnailList>,
    #[serde(default)]
    pub view_count: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ThumbnailList {
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Microformat {
    #[serde(default)]
    pub player_microformat_renderer: Option<PlayerMicroformat>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerMicroformat {
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub is_family_safe: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StreamingData {
    /// Muxed audio+video renditions.
    #[serde(default)]
    pub formats: Vec<WireFormat>,
    /// Separate audio-only and video-only renditions.
    #[serde(default)]
    pub adaptive_formats: Vec<WireFormat>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireFormat {
    pub itag: u32,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub quality_label: Option<String>,
    #[serde(default)]
    pub fps: Option<u32>,
    #[serde(default)]
    pub content_length: Option<String>,
}

impl WireFormat {
    fn into_stream(self, progressive: bool) -> StreamInfo {
        StreamInfo {
            format_tag: self.itag,
            resolution: self.quality_label,
            mime_type: self.mime_type,
            fps: self.fps,
            size_bytes: self.content_length.and_then(|s| s.parse().ok()),
            progressive,
        }
    }
}

/// Converts a player response into [`VideoDetails`].
///
/// # Errors
///
/// Returns [`ClientError::ContentUnavailable`] when the response carries no
/// video details or reports the video as unplayable for reasons other than
/// an age gate.
pub(crate) fn video_from_player(
    video_id: &str,
    response: PlayerResponse,
) -> Result<VideoDetails, ClientError> {
    let (status, reason) = response
        .playability_status
        .map(|p| (p.status, p.reason))
        .unwrap_or_default();
    let age_gated = status == "LOGIN_REQUIRED"
        && reason
            .as_deref()
            .is_some_and(|r| r.to_ascii_lowercase().contains("age"));

    let Some(details) = response.video_details else {
        return Err(ClientError::ContentUnavailable(reason.unwrap_or_else(|| {
            format!("video {video_id} returned no details (status {status})")
        })));
    };

    if matches!(status.as_str(), "ERROR" | "UNPLAYABLE") {
        return Err(ClientError::ContentUnavailable(
            reason.unwrap_or_else(|| format!("video {video_id} is {status}")),
        ));
    }

    let microformat = response
        .microformat
        .and_then(|m| m.player_microformat_renderer);
    let family_safe = microformat.as_ref().and_then(|m| m.is_family_safe);
    let publish_date = microformat.and_then(|m| m.publish_date);

    let streams = response
        .streaming_data
        .map(|sd| {
            let muxed = sd.formats.into_iter().map(|f| f.into_stream(true));
            let adaptive = sd.adaptive_formats.into_iter().map(|f| f.into_stream(false));
            muxed.chain(adaptive).collect()
        })
        .unwrap_or_default();

    let id = if details.video_id.is_empty() {
        video_id.to_owned()
    } else {
        details.video_id
    };

    Ok(VideoDetails {
        id,
        title: details.title,
        description: details.short_description,
        author: details.author,
        channel_id: details.channel_id,
        publish_date,
        length_seconds: details.length_seconds.and_then(|s| s.parse().ok()),
        view_count: details.view_count.and_then(|s| s.parse().ok()),
        rating: details.average_rating,
        keywords: details.keywords,
        age_restricted: age_gated || family_safe == Some(false),
        thumbnail_url: details
            .thumbnail
            .and_then(|t| t.thumbnails.into_iter().last())
            .map(|t| t.url),
        streams,
    })
}

/// Extracts the browse id from a `navigation/resolve_url` response.
pub(crate) fn browse_id_from_resolve(body: &Value) -> Option<String> {
    body.pointer("/endpoint/browseEndpoint/browseId")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Converts a channel `browse` response into [`ChannelDetails`].
///
/// # Errors
///
/// Returns [`ClientError::ContentUnavailable`] when the response has no
/// channel metadata block.
pub(crate) fn channel_from_browse(
    browse_id: &str,
    body: &Value,
) -> Result<ChannelDetails, ClientError> {
    let Some(meta) = body.pointer("/metadata/channelMetadataRenderer") else {
        let reason = body
            .pointer("/alerts/0/alertRenderer/text/simpleText")
            .and_then(Value::as_str)
            .map_or_else(
                || format!("channel {browse_id} returned no metadata"),
                str::to_owned,
            );
        return Err(ClientError::ContentUnavailable(reason));
    };

    let text = |key: &str| {
        meta.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    };

    let mut recent_videos = Vec::new();
    collect_video_renderers(body.get("contents").unwrap_or(&Value::Null), &mut recent_videos);

    Ok(ChannelDetails {
        id: text("externalId").unwrap_or_else(|| browse_id.to_owned()),
        name: text("title"),
        about: text("description"),
        recent_videos,
    })
}

/// Depth-first walk collecting `videoRenderer`/`gridVideoRenderer` objects;
/// array elements are visited in order.
fn collect_video_renderers(node: &Value, out: &mut Vec<RecentVideo>) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                if key == "videoRenderer" || key == "gridVideoRenderer" {
                    if let Some(video) = recent_video_from_renderer(value) {
                        out.push(video);
                    }
                } else {
                    collect_video_renderers(value, out);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_video_renderers(item, out);
            }
        }
        _ => {}
    }
}

fn recent_video_from_renderer(renderer: &Value) -> Option<RecentVideo> {
    let id = renderer.get("videoId")?.as_str()?.to_owned();
    Some(RecentVideo {
        id,
        title: renderer.get("title").and_then(text_of),
        publish_date: renderer.get("publishedTimeText").and_then(text_of),
        view_count: renderer
            .get("viewCountText")
            .and_then(text_of)
            .and_then(|s| parse_view_text(&s)),
        length_seconds: renderer
            .get("lengthText")
            .and_then(text_of)
            .and_then(|s| parse_clock(&s)),
    })
}

/// Reads either `{"simpleText": …}` or `{"runs": [{"text": …}, …]}`.
fn text_of(node: &Value) -> Option<String> {
    if let Some(simple) = node.get("simpleText").and_then(Value::as_str) {
        return Some(simple.to_owned());
    }
    let runs = node.get("runs")?.as_array()?;
    let joined: String = runs
        .iter()
        .filter_map(|r| r.get("text").and_then(Value::as_str))
        .collect();
    (!joined.is_empty()).then_some(joined)
}

/// `"1,234,567 views"` → `1234567`.
fn parse_view_text(text: &str) -> Option<u64> {
    let digits: String = text
        .split_whitespace()
        .next()?
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// `"1:02:03"` / `"12:34"` → seconds.
fn parse_clock(text: &str) -> Option<u64> {
    text.trim().split(':').try_fold(0u64, |acc, part| {
        part.parse::<u64>()
            .ok()
            .map(|n| acc.saturating_mul(60).saturating_add(n))
    })
}
