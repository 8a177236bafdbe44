//! Primary-then-fallback orchestration.
//!
//! ```text
//! Start -> ParsingURL -> TryingPrimary -> Success
//!                    \              \-> TryingFallback -> Success | Failed
//!                     \-> Failed (no identifier)
//! ```
//!
//! The fallback only runs when an identifier is known. A record always comes
//! from exactly one tier.

use ytubedata_core::{AppConfig, MetadataRecord};
use ytubedata_innertube::{InnertubeClient, MetadataClient};

use crate::error::{ExtractError, WorkflowError};
use crate::fallback::FallbackExtractor;
use crate::primary::{channel_record, PrimaryExtractor};
use crate::reference::{
    normalize_url, parse_channel_reference, parse_video_reference, ChannelRef, TargetKind,
};
use crate::retry::RetryPolicy;

pub struct Workflow<C> {
    primary: PrimaryExtractor<C>,
    fallback: FallbackExtractor,
}

impl Workflow<InnertubeClient> {
    /// Builds the production workflow from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ExtractError> {
        let client = InnertubeClient::with_base_url(
            config.request_timeout_secs,
            &config.user_agent,
            &config.base_url,
        )?;
        let fallback = FallbackExtractor::with_base_url(
            config.request_timeout_secs,
            &config.user_agent,
            &config.base_url,
        )?;
        Ok(Self::new(
            PrimaryExtractor::new(client, RetryPolicy::from_config(config)),
            fallback,
        ))
    }
}

impl<C: MetadataClient> Workflow<C> {
    pub fn new(primary: PrimaryExtractor<C>, fallback: FallbackExtractor) -> Self {
        Self { primary, fallback }
    }

    /// Runs the workflow and returns the record, or `None` after logging why
    /// nothing could be extracted.
    pub async fn fetch(&self, kind: TargetKind, url: &str) -> Option<MetadataRecord> {
        match self.extract(kind, url).await {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::error!(%kind, error = %err, "metadata extraction failed");
                None
            }
        }
    }

    /// Runs the workflow and reports why it failed.
    ///
    /// # Errors
    ///
    /// - [`WorkflowError::InvalidReference`] when no identifier could be
    ///   derived from `url`; no network request is made.
    /// - [`WorkflowError::NoData`] when both tiers failed, or the primary
    ///   tier failed and no identifier was available for the fallback.
    pub async fn extract(
        &self,
        kind: TargetKind,
        url: &str,
    ) -> Result<MetadataRecord, WorkflowError> {
        let url = normalize_url(url);
        tracing::info!(stage = "parsing_url", %kind, %url, "parsing reference");
        match kind {
            TargetKind::Video => self.extract_video(&url).await,
            TargetKind::Channel => self.extract_channel(&url).await,
        }
    }

    async fn extract_video(&self, url: &str) -> Result<MetadataRecord, WorkflowError> {
        let video_id = parse_video_reference(url).map_err(WorkflowError::InvalidReference)?;

        tracing::info!(stage = "trying_primary", %video_id, "fetching video metadata");
        let primary_err = match self.primary.extract_video(&video_id).await {
            Ok(record) => {
                tracing::info!(
                    stage = "success",
                    tier = "primary",
                    %video_id,
                    "video metadata extracted"
                );
                return Ok(MetadataRecord::Video(record));
            }
            Err(err) => err,
        };

        tracing::warn!(
            stage = "trying_fallback",
            %video_id,
            error = %primary_err,
            "primary extraction failed"
        );
        match self.fallback.fetch_video(&video_id).await {
            Some(record) => {
                tracing::info!(
                    stage = "success",
                    tier = "fallback",
                    %video_id,
                    "video metadata extracted"
                );
                Ok(MetadataRecord::Video(record))
            }
            None => Err(no_data(url)),
        }
    }

    async fn extract_channel(&self, url: &str) -> Result<MetadataRecord, WorkflowError> {
        let reference = parse_channel_reference(url).map_err(WorkflowError::InvalidReference)?;

        let (channel_id, primary) = match &reference {
            ChannelRef::Id { id, url } => {
                tracing::info!(
                    stage = "trying_primary",
                    channel_id = %id,
                    "fetching channel metadata"
                );
                (Some(id.clone()), self.primary.extract_channel(url).await)
            }
            ChannelRef::Custom { url } => match self.primary.resolve_channel(url).await {
                // The resolving fetch already returned the full channel.
                Some(details) => (Some(details.id.clone()), Ok(channel_record(details, url))),
                None => {
                    tracing::info!(stage = "trying_primary", %url, "fetching channel metadata");
                    (None, self.primary.extract_channel(url).await)
                }
            },
        };

        let primary_err = match primary {
            Ok(record) => {
                tracing::info!(
                    stage = "success",
                    tier = "primary",
                    url = reference.url(),
                    "channel metadata extracted"
                );
                return Ok(MetadataRecord::Channel(record));
            }
            Err(err) => err,
        };

        let Some(channel_id) = channel_id else {
            tracing::warn!(
                error = %primary_err,
                url = reference.url(),
                "primary extraction failed and no channel id is known"
            );
            return Err(no_data(url));
        };

        tracing::warn!(
            stage = "trying_fallback",
            %channel_id,
            error = %primary_err,
            "primary extraction failed"
        );
        match self.fallback.fetch_channel(&channel_id).await {
            Some(record) => {
                tracing::info!(
                    stage = "success",
                    tier = "fallback",
                    %channel_id,
                    "channel metadata extracted"
                );
                Ok(MetadataRecord::Channel(record))
            }
            None => Err(no_data(url)),
        }
    }
}

fn no_data(url: &str) -> WorkflowError {
    tracing::warn!(stage = "failed", url, "no tier produced a record");
    WorkflowError::NoData {
        url: url.to_owned(),
    }
}
