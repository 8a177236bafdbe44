//! Two-tier metadata extraction: a structured primary client with bounded
//! retry, and a page-scraping fallback.

pub mod error;
pub mod fallback;
pub mod primary;
pub mod reference;
pub mod retry;
pub mod workflow;

pub use error::{ExtractError, WorkflowError};
pub use fallback::FallbackExtractor;
pub use primary::PrimaryExtractor;
pub use reference::{ChannelRef, TargetKind};
pub use retry::RetryPolicy;
pub use workflow::Workflow;
