/// Structured video metadata as returned by the client.
///
/// Optional fields are `None` when the platform omitted them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoDetails {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub channel_id: Option<String>,
    /// Raw publish date, either `YYYY-MM-DD`, RFC 3339, or `YYYYMMDD`.
    pub publish_date: Option<String>,
    pub length_seconds: Option<u64>,
    pub view_count: Option<u64>,
    pub rating: Option<f64>,
    pub keywords: Vec<String>,
    pub age_restricted: bool,
    pub thumbnail_url: Option<String>,
    pub streams: Vec<StreamInfo>,
}

/// One stream rendition of a video.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamInfo {
    pub format_tag: u32,
    pub resolution: Option<String>,
    pub mime_type: String,
    pub fps: Option<u32>,
    pub size_bytes: Option<u64>,
    /// `true` for muxed audio+video renditions.
    pub progressive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelDetails {
    pub id: String,
    pub name: Option<String>,
    pub about: Option<String>,
    /// First page of uploads, in the order the platform lists them.
    pub recent_videos: Vec<RecentVideo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentVideo {
    pub id: String,
    pub title: Option<String>,
    /// Relative or absolute publish text as shown by the platform.
    pub publish_date: Option<String>,
    pub view_count: Option<u64>,
    pub length_seconds: Option<u64>,
}
