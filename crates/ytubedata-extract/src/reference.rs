//! URL normalisation and identifier extraction.
//!
//! Identifiers are pulled out by literal substring splitting on the known
//! URL markers; no URL parser is involved.

use std::fmt;

use crate::error::ExtractError;

/// What the input URL is expected to point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Video,
    Channel,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Video => write!(f, "video"),
            TargetKind::Channel => write!(f, "channel"),
        }
    }
}

/// A parsed channel reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    /// `/channel/ID`; the identifier is known up front.
    Id { id: String, url: String },
    /// `/c/NAME`, `/user/NAME` or `@handle`; the identifier must be
    /// resolved through the metadata client.
    Custom { url: String },
}

impl ChannelRef {
    pub fn url(&self) -> &str {
        match self {
            ChannelRef::Id { url, .. } | ChannelRef::Custom { url } => url,
        }
    }
}

/// Trims whitespace and adds an `https://` scheme when none is present.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    }
}

/// Extracts the video id from a watch URL or a `youtu.be` short link.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidReference`] when neither marker is present
/// or the id is empty.
pub fn parse_video_reference(url: &str) -> Result<String, ExtractError> {
    let id = if url.contains("youtube.com/watch") && url.contains("v=") {
        url.split("v=")
            .nth(1)
            .and_then(|rest| rest.split(['&', '#']).next())
    } else if url.contains("youtu.be/") {
        url.split("youtu.be/")
            .nth(1)
            .and_then(|rest| rest.split(['?', '#']).next())
    } else {
        None
    };

    match id.map(|s| s.trim_end_matches('/')) {
        Some(id) if !id.is_empty() => Ok(id.to_owned()),
        _ => Err(ExtractError::InvalidReference {
            kind: TargetKind::Video,
            url: url.to_owned(),
        }),
    }
}

/// Classifies a channel URL.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidReference`] when no channel marker is
/// present or a `/channel/` URL has an empty id.
pub fn parse_channel_reference(url: &str) -> Result<ChannelRef, ExtractError> {
    let invalid = || ExtractError::InvalidReference {
        kind: TargetKind::Channel,
        url: url.to_owned(),
    };

    if url.contains("/channel/") {
        let id = url
            .split("/channel/")
            .nth(1)
            .and_then(|rest| rest.split(['/', '?', '#']).next())
            .filter(|id| !id.is_empty())
            .ok_or_else(invalid)?;
        return Ok(ChannelRef::Id {
            id: id.to_owned(),
            url: url.to_owned(),
        });
    }

    if url.contains("/c/") || url.contains("/user/") || url.contains('@') {
        return Ok(ChannelRef::Custom {
            url: url.to_owned(),
        });
    }

    Err(invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_url_adds_scheme_and_trims() {
        assert_eq!(
            normalize_url("  youtu.be/abc \n"),
            "https://youtu.be/abc"
        );
        assert_eq!(
            normalize_url("http://youtube.com/watch?v=x"),
            "http://youtube.com/watch?v=x"
        );
    }

    #[test]
    fn parses_watch_url() {
        assert_eq!(
            parse_video_reference("https://www.youtube.com/watch?v=test_video_id").unwrap(),
            "test_video_id"
        );
    }

    #[test]
    fn parses_watch_url_with_extra_params() {
        assert_eq!(
            parse_video_reference("https://www.youtube.com/watch?v=abc123&t=42s").unwrap(),
            "abc123"
        );
    }

    #[test]
    fn parses_short_link() {
        assert_eq!(
            parse_video_reference("https://youtu.be/abc123?si=share").unwrap(),
            "abc123"
        );
    }

    #[test]
    fn rejects_url_without_video_marker() {
        let err = parse_video_reference("https://www.youtube.com/feed/trending").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::InvalidReference {
                kind: TargetKind::Video,
                ..
            }
        ));
    }

    #[test]
    fn rejects_empty_video_id() {
        assert!(parse_video_reference("https://www.youtube.com/watch?v=").is_err());
        assert!(parse_video_reference("https://youtu.be/").is_err());
    }

    #[test]
    fn parses_channel_id_url() {
        let got = parse_channel_reference("https://www.youtube.com/channel/UC123/videos").unwrap();
        assert_eq!(
            got,
            ChannelRef::Id {
                id: "UC123".to_owned(),
                url: "https://www.youtube.com/channel/UC123/videos".to_owned()
            }
        );
    }

    #[test]
    fn classifies_custom_channel_urls() {
        for url in [
            "https://www.youtube.com/c/GoogleDevelopers",
            "https://www.youtube.com/user/someone",
            "https://www.youtube.com/@handle",
        ] {
            let got = parse_channel_reference(url).unwrap();
            assert_eq!(
                got,
                ChannelRef::Custom {
                    url: url.to_owned()
                },
                "{url}"
            );
        }
    }

    #[test]
    fn rejects_channel_url_without_marker() {
        let err = parse_channel_reference("https://www.youtube.com/watch?v=abc").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::InvalidReference {
                kind: TargetKind::Channel,
                ..
            }
        ));
        assert!(parse_channel_reference("https://www.youtube.com/channel/").is_err());
    }
}
