use thiserror::Error;
use ytubedata_innertube::ClientError;

use crate::reference::TargetKind;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The URL carries no recognisable video or channel identifier.
    #[error("invalid {kind} URL \"{url}\": no identifier found")]
    InvalidReference { kind: TargetKind, url: String },

    /// The metadata client failed (content unavailable, malformed reference,
    /// or a transient fetch error).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The fallback page answered with a non-200 status.
    #[error("fallback page {url} returned HTTP {status}")]
    FallbackUnavailable { url: String, status: u16 },

    /// Network or TLS failure while fetching a fallback page.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ExtractError {
    /// Returns `true` when another primary attempt may succeed.
    pub fn is_retriable(&self) -> bool {
        match self {
            ExtractError::Client(err) => err.is_transient(),
            ExtractError::InvalidReference { .. }
            | ExtractError::FallbackUnavailable { .. }
            | ExtractError::Http(_) => false,
        }
    }
}

/// Terminal failure of the metadata workflow.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// No identifier could be derived; no extraction tier was attempted.
    #[error(transparent)]
    InvalidReference(ExtractError),

    /// Both tiers were exhausted, or the fallback lacked an identifier.
    #[error("no data could be extracted for {url}")]
    NoData { url: String },
}
