//! Structured extraction through a [`MetadataClient`].
//!
//! Every client call goes through [`retry_fixed`]; the resulting details are
//! flattened into display-ready records with the sentinel in place of any
//! missing field.

use chrono::DateTime;
use ytubedata_core::{
    channel_url_for, format_date, format_duration, format_number, format_size_mb, or_unavailable,
    truncate_description, video_url_for, ChannelRecord, StreamDescriptor, VideoRecord,
    VideoSummary, UNAVAILABLE,
};
use ytubedata_innertube::{ChannelDetails, MetadataClient, RecentVideo, StreamInfo, VideoDetails};

use crate::error::ExtractError;
use crate::retry::{retry_fixed, RetryPolicy};

pub struct PrimaryExtractor<C> {
    client: C,
    policy: RetryPolicy,
}

impl<C: MetadataClient> PrimaryExtractor<C> {
    pub fn new(client: C, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Fetches and assembles the record for `video_id`.
    ///
    /// # Errors
    ///
    /// Returns the client error from the final attempt once the retry policy
    /// is exhausted, or immediately for non-retriable errors.
    pub async fn extract_video(&self, video_id: &str) -> Result<VideoRecord, ExtractError> {
        let client = &self.client;
        let details = retry_fixed(self.policy, "video fetch", || async move {
            client
                .fetch_video(video_id)
                .await
                .map_err(ExtractError::from)
        })
        .await?;
        Ok(video_record(details))
    }

    /// Fetches and assembles the record for the channel at `channel_url`.
    ///
    /// # Errors
    ///
    /// Same contract as [`PrimaryExtractor::extract_video`].
    pub async fn extract_channel(&self, channel_url: &str) -> Result<ChannelRecord, ExtractError> {
        let client = &self.client;
        let details = retry_fixed(self.policy, "channel fetch", || async move {
            client
                .fetch_channel(channel_url)
                .await
                .map_err(ExtractError::from)
        })
        .await?;
        Ok(channel_record(details, channel_url))
    }

    /// Resolves a custom channel URL with a single client fetch.
    ///
    /// Returns `None` (after logging) when the fetch fails or the platform
    /// reports no channel id.
    pub async fn resolve_channel(&self, channel_url: &str) -> Option<ChannelDetails> {
        match self.client.fetch_channel(channel_url).await {
            Ok(details) if !details.id.is_empty() => {
                tracing::debug!(channel_url, channel_id = %details.id, "resolved channel id");
                Some(details)
            }
            Ok(_) => {
                tracing::warn!(channel_url, "channel resolved without an id");
                None
            }
            Err(err) => {
                tracing::warn!(channel_url, error = %err, "could not resolve channel id");
                None
            }
        }
    }
}

pub(crate) fn video_record(details: VideoDetails) -> VideoRecord {
    let channel_id = or_unavailable(details.channel_id.unwrap_or_default());
    VideoRecord {
        title: or_unavailable(details.title.unwrap_or_default()),
        description: truncate_description(details.description.as_deref()),
        channel_name: or_unavailable(details.author.unwrap_or_default()),
        channel_url: channel_url_for(&channel_id),
        channel_id,
        publish_date: format_publish_date(details.publish_date.as_deref()),
        duration_seconds: details.length_seconds,
        duration: format_duration(details.length_seconds),
        view_count_raw: details.view_count,
        view_count: format_number(details.view_count),
        rating: details
            .rating
            .map_or_else(|| UNAVAILABLE.to_owned(), |r| r.to_string()),
        keywords: details.keywords,
        age_restricted: Some(details.age_restricted),
        thumbnail_url: or_unavailable(details.thumbnail_url.unwrap_or_default()),
        streams: details
            .streams
            .iter()
            .filter(|s| s.progressive)
            .map(stream_descriptor)
            .collect(),
        video_id: details.id,
        note: None,
    }
}

pub(crate) fn channel_record(details: ChannelDetails, channel_url: &str) -> ChannelRecord {
    ChannelRecord {
        channel_name: or_unavailable(details.name.unwrap_or_default()),
        channel_id: or_unavailable(details.id),
        description: truncate_description(details.about.as_deref()),
        channel_url: channel_url.to_owned(),
        subscriber_count: UNAVAILABLE.to_owned(),
        recent_videos: details
            .recent_videos
            .into_iter()
            .take(ChannelRecord::RECENT_VIDEO_LIMIT)
            .map(video_summary)
            .collect(),
        note: None,
    }
}

fn stream_descriptor(stream: &StreamInfo) -> StreamDescriptor {
    StreamDescriptor {
        format_tag: stream.format_tag,
        resolution: or_unavailable(stream.resolution.clone().unwrap_or_default()),
        mime_type: or_unavailable(stream.mime_type.clone()),
        fps: stream
            .fps
            .map_or_else(|| UNAVAILABLE.to_owned(), |fps| fps.to_string()),
        size_mb: format_size_mb(stream.size_bytes),
    }
}

fn video_summary(video: RecentVideo) -> VideoSummary {
    VideoSummary {
        title: or_unavailable(video.title.unwrap_or_default()),
        video_url: video_url_for(&video.id),
        publish_date: format_date(video.publish_date.as_deref()),
        view_count: format_number(video.view_count),
        duration: format_duration(video.length_seconds),
        video_id: video.id,
    }
}

/// RFC 3339 timestamps become `YYYY-MM-DD HH:MM:SS` in their own offset;
/// anything else goes through [`format_date`].
fn format_publish_date(raw: Option<&str>) -> String {
    match raw {
        Some(text) => DateTime::parse_from_rfc3339(text).map_or_else(
            |_| format_date(text),
            |ts| ts.naive_local().format("%Y-%m-%d %H:%M:%S").to_string(),
        ),
        None => UNAVAILABLE.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use ytubedata_core::SizeMb;
    use ytubedata_innertube::ClientError;

    /// Client that fails the first `failures` calls with a 503, then serves
    /// the stored details.
    struct FlakyClient {
        failures: u32,
        calls: AtomicU32,
        video: VideoDetails,
        channel: ChannelDetails,
    }

    impl FlakyClient {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
                video: sample_video(),
                channel: sample_channel(7),
            }
        }

        fn next(&self) -> Result<(), ClientError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(ClientError::UnexpectedStatus {
                    status: 503,
                    url: "mock".to_owned(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl MetadataClient for FlakyClient {
        async fn fetch_video(&self, _video_id: &str) -> Result<VideoDetails, ClientError> {
            self.next().map(|()| self.video.clone())
        }

        async fn fetch_channel(&self, _channel_url: &str) -> Result<ChannelDetails, ClientError> {
            self.next().map(|()| self.channel.clone())
        }
    }

    fn instant() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            backoff: Duration::ZERO,
        }
    }

    fn sample_video() -> VideoDetails {
        VideoDetails {
            id: "test_video_id".to_owned(),
            title: Some("X".to_owned()),
            description: Some("d".repeat(250)),
            author: Some("Channel Name".to_owned()),
            channel_id: Some("UCtest".to_owned()),
            publish_date: Some("2021-01-01T10:00:00-07:00".to_owned()),
            length_seconds: Some(3661),
            view_count: Some(1_000_000),
            rating: None,
            keywords: vec!["rust".to_owned()],
            age_restricted: false,
            thumbnail_url: None,
            streams: vec![
                StreamInfo {
                    format_tag: 22,
                    resolution: Some("720p".to_owned()),
                    mime_type: "video/mp4".to_owned(),
                    fps: Some(30),
                    size_bytes: Some(10_485_760),
                    progressive: true,
                },
                StreamInfo {
                    format_tag: 137,
                    resolution: Some("1080p".to_owned()),
                    mime_type: "video/mp4".to_owned(),
                    fps: Some(30),
                    size_bytes: None,
                    progressive: false,
                },
            ],
        }
    }

    fn sample_channel(videos: usize) -> ChannelDetails {
        ChannelDetails {
            id: "UCtest".to_owned(),
            name: Some("Channel Name".to_owned()),
            about: None,
            recent_videos: (0..videos)
                .map(|i| RecentVideo {
                    id: format!("v{i}"),
                    title: Some(format!("Video {i}")),
                    publish_date: Some("20210101".to_owned()),
                    view_count: Some(1000),
                    length_seconds: Some(61),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn extract_video_builds_display_record() {
        let extractor = PrimaryExtractor::new(FlakyClient::new(0), instant());
        let record = extractor.extract_video("test_video_id").await.unwrap();

        assert_eq!(record.title, "X");
        assert_eq!(record.duration, "1:01:01");
        assert_eq!(record.view_count, "1,000,000");
        assert_eq!(record.publish_date, "2021-01-01 10:00:00");
        assert_eq!(record.channel_url, "https://www.youtube.com/channel/UCtest");
        assert_eq!(record.rating, UNAVAILABLE);
        assert_eq!(record.thumbnail_url, UNAVAILABLE);
        assert!(record.description.ends_with("..."));
        assert_eq!(record.description.chars().count(), 203);
        assert!(record.note.is_none());
    }

    #[tokio::test]
    async fn extract_video_keeps_only_progressive_streams() {
        let extractor = PrimaryExtractor::new(FlakyClient::new(0), instant());
        let record = extractor.extract_video("test_video_id").await.unwrap();

        assert_eq!(record.streams.len(), 1);
        let stream = &record.streams[0];
        assert_eq!(stream.format_tag, 22);
        assert_eq!(stream.resolution, "720p");
        assert_eq!(stream.fps, "30");
        assert_eq!(stream.size_mb, SizeMb::Megabytes(10.0));
    }

    #[tokio::test]
    async fn extract_video_retries_transient_failures() {
        let client = FlakyClient::new(2);
        let extractor = PrimaryExtractor::new(client, instant());
        let record = extractor.extract_video("test_video_id").await.unwrap();
        assert_eq!(record.title, "X");
        assert_eq!(extractor.client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn extract_video_gives_up_after_policy_attempts() {
        let extractor = PrimaryExtractor::new(FlakyClient::new(u32::MAX), instant());
        let err = extractor.extract_video("test_video_id").await.unwrap_err();
        assert!(matches!(err, ExtractError::Client(_)), "got: {err:?}");
        assert_eq!(extractor.client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn extract_channel_caps_recent_videos_in_source_order() {
        let extractor = PrimaryExtractor::new(FlakyClient::new(0), instant());
        let record = extractor
            .extract_channel("https://www.youtube.com/channel/UCtest")
            .await
            .unwrap();

        assert_eq!(record.recent_videos.len(), ChannelRecord::RECENT_VIDEO_LIMIT);
        let ids: Vec<&str> = record
            .recent_videos
            .iter()
            .map(|v| v.video_id.as_str())
            .collect();
        assert_eq!(ids, ["v0", "v1", "v2", "v3", "v4"]);
        assert_eq!(record.recent_videos[0].publish_date, "2021-01-01");
        assert_eq!(record.recent_videos[0].duration, "01:01");
        assert_eq!(
            record.recent_videos[0].video_url,
            "https://www.youtube.com/watch?v=v0"
        );
        assert_eq!(record.subscriber_count, UNAVAILABLE);
        assert_eq!(record.description, UNAVAILABLE);
        assert_eq!(record.channel_url, "https://www.youtube.com/channel/UCtest");
    }

    #[tokio::test]
    async fn resolve_channel_makes_a_single_attempt() {
        let extractor = PrimaryExtractor::new(FlakyClient::new(1), instant());
        assert!(extractor
            .resolve_channel("https://www.youtube.com/@handle")
            .await
            .is_none());
        assert_eq!(extractor.client.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn format_publish_date_handles_each_shape() {
        assert_eq!(
            format_publish_date(Some("2021-01-01T10:00:00+00:00")),
            "2021-01-01 10:00:00"
        );
        assert_eq!(format_publish_date(Some("20210101")), "2021-01-01");
        assert_eq!(format_publish_date(Some("2021-01-01")), "2021-01-01");
        assert_eq!(format_publish_date(None), UNAVAILABLE);
    }
}
