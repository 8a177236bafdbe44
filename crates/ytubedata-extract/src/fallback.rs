//! Page-scraping fallback.
//!
//! A single GET against the public watch or channel page; every field is an
//! independent regex over the markup, and a miss leaves only that field at
//! the sentinel. Records built here always carry [`FALLBACK_NOTE`].

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::{header, Client, StatusCode};
use ytubedata_core::{
    channel_url_for, format_date, format_number, truncate_description, video_url_for,
    ChannelRecord, VideoRecord, VideoSummary, FALLBACK_NOTE, UNAVAILABLE,
};

use crate::error::ExtractError;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<title>(.*?) - YouTube</title>").expect("valid regex"));
static OWNER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""ownerChannelName":"([^"]+)""#).expect("valid regex"));
static CHANNEL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""channelId":"([^"]+)""#).expect("valid regex"));
static VIEW_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""viewCount":"([^"]+)""#).expect("valid regex"));
static PUBLISH_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""publishDate":"([^"]+)""#).expect("valid regex"));
static THUMBNAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""thumbnailUrl":\["([^"]+)""#).expect("valid regex"));
static META_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<meta name="title" content="([^"]+)""#).expect("valid regex"));
static META_DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta name="description" content="([^"]+)""#).expect("valid regex")
});
static RUN_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""title":\{"runs":\[\{"text":"([^"]+)"\}\]\}"#).expect("valid regex")
});
static VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""videoId":"([^"]+)""#).expect("valid regex"));

/// Scrapes the public watch and channel pages.
///
/// Pages are fetched from the origin given to
/// [`FallbackExtractor::with_base_url`].
pub struct FallbackExtractor {
    client: Client,
    base_url: String,
}

impl FallbackExtractor {
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ExtractError> {
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

    /// Scrapes the watch page for `video_id`.
    ///
    /// Any failure is logged and reported as `None`.
    pub async fn fetch_video(&self, video_id: &str) -> Option<VideoRecord> {
        let url = format!("{}/watch?v={video_id}", self.base_url);
        match self.get_page(&url).await {
            Ok(html) => Some(parse_video_page(video_id, &html)),
            Err(err) => {
                tracing::warn!(%url, error = %err, "fallback video scrape failed");
                None
            }
        }
    }

    /// Scrapes the channel page for `channel_id`.
    ///
    /// Any failure is logged and reported as `None`.
    pub async fn fetch_channel(&self, channel_id: &str) -> Option<ChannelRecord> {
        let url = format!("{}/channel/{channel_id}", self.base_url);
        match self.get_page(&url).await {
            Ok(html) => Some(parse_channel_page(channel_id, &html)),
            Err(err) => {
                tracing::warn!(%url, error = %err, "fallback channel scrape failed");
                None
            }
        }
    }

    async fn get_page(&self, url: &str) -> Result<String, ExtractError> {
        tracing::debug!(url, "fallback GET");
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ExtractError::FallbackUnavailable {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

fn capture<'h>(re: &Regex, html: &'h str) -> Option<&'h str> {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn scraped(re: &Regex, html: &str) -> String {
    capture(re, html)
        .map(unescape)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| UNAVAILABLE.to_owned())
}

pub(crate) fn parse_video_page(video_id: &str, html: &str) -> VideoRecord {
    let channel_id = scraped(&CHANNEL_ID_RE, html);
    let view_count_raw = capture(&VIEW_COUNT_RE, html);
    VideoRecord {
        title: scraped(&TITLE_RE, html),
        channel_name: scraped(&OWNER_RE, html),
        channel_url: channel_url_for(&channel_id),
        channel_id,
        publish_date: format_date(capture(&PUBLISH_DATE_RE, html)),
        view_count_raw: view_count_raw.and_then(|v| v.parse().ok()),
        view_count: format_number(view_count_raw),
        thumbnail_url: scraped(&THUMBNAIL_RE, html),
        note: Some(FALLBACK_NOTE.to_owned()),
        ..VideoRecord::unavailable(video_id)
    }
}

pub(crate) fn parse_channel_page(channel_id: &str, html: &str) -> ChannelRecord {
    let description = capture(&META_DESCRIPTION_RE, html).map(unescape);
    let titles = RUN_TITLE_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()));
    let ids = VIDEO_ID_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()));

    // Titles and ids are independent match streams; they are paired by
    // position only.
    let recent_videos = ids
        .zip(titles)
        .take(ChannelRecord::RECENT_VIDEO_LIMIT)
        .map(|(id, title)| VideoSummary {
            title: unescape(title),
            video_id: id.to_owned(),
            video_url: video_url_for(id),
            publish_date: UNAVAILABLE.to_owned(),
            view_count: UNAVAILABLE.to_owned(),
            duration: UNAVAILABLE.to_owned(),
        })
        .collect();

    ChannelRecord {
        channel_name: scraped(&META_TITLE_RE, html),
        channel_id: channel_id.to_owned(),
        description: truncate_description(description.as_deref()),
        channel_url: channel_url_for(channel_id),
        subscriber_count: UNAVAILABLE.to_owned(),
        recent_videos,
        note: Some(FALLBACK_NOTE.to_owned()),
    }
}

/// Decodes the handful of entities and JSON escapes that appear in scraped
/// page text.
fn unescape(raw: &str) -> String {
    raw.replace("\\u0026", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
