use thiserror::Error;

/// Errors returned by a [`MetadataClient`](crate::MetadataClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status that is neither a 404 nor a 400.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The platform reports the video or channel as missing, removed, or
    /// otherwise not viewable.
    #[error("content unavailable: {0}")]
    ContentUnavailable(String),

    /// The platform rejected the identifier or URL itself.
    #[error("malformed reference: {0}")]
    MalformedReference(String),
}

impl ClientError {
    /// Returns `true` for short-lived failures worth another attempt.
    ///
    /// Network failures, 5xx and 429 statuses, and undecodable bodies are
    /// transient. Content and reference errors are definitive.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Http(_) | ClientError::Deserialize { .. } => true,
            ClientError::UnexpectedStatus { status, .. } => *status >= 500 || *status == 429,
            ClientError::ContentUnavailable(_) | ClientError::MalformedReference(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = ClientError::UnexpectedStatus {
            status: 503,
            url: "https://example.com".to_owned(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn rate_limit_is_transient() {
        let err = ClientError::UnexpectedStatus {
            status: 429,
            url: "https://example.com".to_owned(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn forbidden_is_not_transient() {
        let err = ClientError::UnexpectedStatus {
            status: 403,
            url: "https://example.com".to_owned(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn content_errors_are_not_transient() {
        assert!(!ClientError::ContentUnavailable("gone".to_owned()).is_transient());
        assert!(!ClientError::MalformedReference("bad".to_owned()).is_transient());
    }

    #[test]
    fn deserialize_error_is_transient() {
        let source = serde_json::from_str::<()>("nope").unwrap_err();
        let err = ClientError::Deserialize {
            context: "test".to_owned(),
            source,
        };
        assert!(err.is_transient());
    }
}
