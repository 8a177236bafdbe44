use std::fmt;

use serde::{Serialize, Serializer};

/// Placeholder for any field the extractors could not populate.
pub const UNAVAILABLE: &str = "unavailable";

/// Attached to every record produced by the page-scraping fallback.
pub const FALLBACK_NOTE: &str =
    "Data obtained with the fallback page-scraping method; some fields may be unavailable.";

const CHANNEL_URL_BASE: &str = "https://www.youtube.com/channel/";
const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// One extraction result, produced by exactly one tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetadataRecord {
    Video(VideoRecord),
    Channel(ChannelRecord),
}

impl MetadataRecord {
    /// Display heading for the record (video title or channel name).
    pub fn heading(&self) -> String {
        match self {
            MetadataRecord::Video(v) => format!("Video metadata: {}", v.title),
            MetadataRecord::Channel(c) => format!("Channel metadata: {}", c.channel_name),
        }
    }

    /// Fallback note, present only on records from the scraping tier.
    pub fn note(&self) -> Option<&str> {
        match self {
            MetadataRecord::Video(v) => v.note.as_deref(),
            MetadataRecord::Channel(c) => c.note.as_deref(),
        }
    }

    /// Ordered `(label, value)` pairs for every non-list field.
    pub fn scalar_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            MetadataRecord::Video(v) => v.scalar_fields(),
            MetadataRecord::Channel(c) => c.scalar_fields(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoRecord {
    pub title: String,
    pub description: String,
    pub video_id: String,
    pub channel_name: String,
    pub channel_id: String,
    pub channel_url: String,
    pub publish_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count_raw: Option<u64>,
    pub view_count: String,
    pub rating: String,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_restricted: Option<bool>,
    pub thumbnail_url: String,
    pub streams: Vec<StreamDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl VideoRecord {
    /// A record for `video_id` with every other field set to the sentinel.
    pub fn unavailable(video_id: &str) -> Self {
        Self {
            title: UNAVAILABLE.to_owned(),
            description: UNAVAILABLE.to_owned(),
            video_id: video_id.to_owned(),
            channel_name: UNAVAILABLE.to_owned(),
            channel_id: UNAVAILABLE.to_owned(),
            channel_url: UNAVAILABLE.to_owned(),
            publish_date: UNAVAILABLE.to_owned(),
            duration_seconds: None,
            duration: UNAVAILABLE.to_owned(),
            view_count_raw: None,
            view_count: UNAVAILABLE.to_owned(),
            rating: UNAVAILABLE.to_owned(),
            keywords: Vec::new(),
            age_restricted: None,
            thumbnail_url: UNAVAILABLE.to_owned(),
            streams: Vec::new(),
            note: None,
        }
    }

    fn scalar_fields(&self) -> Vec<(&'static str, String)> {
        let keywords = if self.keywords.is_empty() {
            UNAVAILABLE.to_owned()
        } else {
            self.keywords.join(", ")
        };
        let yes_no = |flag: Option<bool>| match flag {
            Some(true) => "yes".to_owned(),
            Some(false) => "no".to_owned(),
            None => UNAVAILABLE.to_owned(),
        };
        let mut fields = vec![
            ("Title", self.title.clone()),
            ("Description", self.description.clone()),
            ("Video ID", self.video_id.clone()),
            ("Channel", self.channel_name.clone()),
            ("Channel ID", self.channel_id.clone()),
            ("Channel URL", self.channel_url.clone()),
            ("Published", self.publish_date.clone()),
            (
                "Duration (seconds)",
                self.duration_seconds
                    .map_or_else(|| UNAVAILABLE.to_owned(), |s| s.to_string()),
            ),
            ("Duration", self.duration.clone()),
            ("Views", self.view_count.clone()),
            ("Rating", self.rating.clone()),
            ("Keywords", keywords),
            ("Age restricted", yes_no(self.age_restricted)),
            ("Family friendly", yes_no(self.age_restricted.map(|r| !r))),
            ("Thumbnail", self.thumbnail_url.clone()),
        ];
        if let Some(note) = &self.note {
            fields.push(("Note", note.clone()));
        }
        fields
    }
}

/// A progressive (muxed audio+video) stream rendition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamDescriptor {
    pub format_tag: u32,
    pub resolution: String,
    pub mime_type: String,
    pub fps: String,
    pub size_mb: SizeMb,
}

/// Stream size in megabytes, or unknown.
///
/// Serializes as a JSON number when known and as the sentinel string
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeMb {
    Megabytes(f64),
    Unavailable,
}

impl fmt::Display for SizeMb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeMb::Megabytes(mb) => {
                let text = mb.to_string();
                if text.contains('.') {
                    write!(f, "{text}")
                } else {
                    write!(f, "{text}.0")
                }
            }
            SizeMb::Unavailable => write!(f, "{UNAVAILABLE}"),
        }
    }
}

impl Serialize for SizeMb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SizeMb::Megabytes(mb) => serializer.serialize_f64(*mb),
            SizeMb::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelRecord {
    pub channel_name: String,
    pub channel_id: String,
    pub description: String,
    pub channel_url: String,
    pub subscriber_count: String,
    pub recent_videos: Vec<VideoSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ChannelRecord {
    /// Maximum number of recent videos carried by a channel record.
    pub const RECENT_VIDEO_LIMIT: usize = 5;

    fn scalar_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Channel", self.channel_name.clone()),
            ("Channel ID", self.channel_id.clone()),
            ("Description", self.description.clone()),
            ("Channel URL", self.channel_url.clone()),
            ("Subscribers", self.subscriber_count.clone()),
        ];
        if let Some(note) = &self.note {
            fields.push(("Note", note.clone()));
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoSummary {
    pub title: String,
    pub video_id: String,
    pub video_url: String,
    pub publish_date: String,
    pub view_count: String,
    pub duration: String,
}

/// Public channel URL for `channel_id`; the sentinel when the id is unknown.
pub fn channel_url_for(channel_id: &str) -> String {
    if channel_id.is_empty() || channel_id == UNAVAILABLE {
        UNAVAILABLE.to_owned()
    } else {
        format!("{CHANNEL_URL_BASE}{channel_id}")
    }
}

/// Public watch URL for `video_id`.
pub fn video_url_for(video_id: &str) -> String {
    format!("{WATCH_URL_BASE}{video_id}")
}

/// Replaces an empty string with the sentinel.
pub fn or_unavailable(value: impl Into<String>) -> String {
    let value = value.into();
    if value.trim().is_empty() {
        UNAVAILABLE.to_owned()
    } else {
        value
    }
}
