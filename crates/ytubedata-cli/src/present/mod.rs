//! Record rendering for the console, JSON, and CSV formats.

mod console;
mod csv;
mod json;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tempfile::NamedTempFile;
use ytubedata_core::MetadataRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Console,
    Json,
    Csv,
}

/// The list attached to a record: streams for a video, recent uploads for a
/// channel.
pub(crate) struct ListTable {
    pub(crate) title: &'static str,
    /// Suffix for the CSV sidecar file (`<base>_<suffix>.csv`).
    pub(crate) suffix: &'static str,
    pub(crate) headers: &'static [&'static str],
    pub(crate) rows: Vec<Vec<String>>,
}

const STREAM_HEADERS: &[&str] = &["itag", "Resolution", "Type", "FPS", "Size (MB)"];
const VIDEO_HEADERS: &[&str] = &["Title", "Published", "Views", "Duration", "URL"];

/// Returns the record's list as a table, or `None` when the list is empty.
pub(crate) fn list_table(record: &MetadataRecord) -> Option<ListTable> {
    let table = match record {
        MetadataRecord::Video(video) => ListTable {
            title: "Available streams",
            suffix: "streams",
            headers: STREAM_HEADERS,
            rows: video
                .streams
                .iter()
                .map(|s| {
                    vec![
                        s.format_tag.to_string(),
                        s.resolution.clone(),
                        s.mime_type.clone(),
                        s.fps.clone(),
                        s.size_mb.to_string(),
                    ]
                })
                .collect(),
        },
        MetadataRecord::Channel(channel) => ListTable {
            title: "Recent videos",
            suffix: "videos",
            headers: VIDEO_HEADERS,
            rows: channel
                .recent_videos
                .iter()
                .map(|v| {
                    vec![
                        v.title.clone(),
                        v.publish_date.clone(),
                        v.view_count.clone(),
                        v.duration.clone(),
                        v.video_url.clone(),
                    ]
                })
                .collect(),
        },
    };
    (!table.rows.is_empty()).then_some(table)
}

/// Renders `record` in `format`.
///
/// Without `output`, everything goes to `out`. Returns the paths of any files
/// written.
///
/// # Errors
///
/// Returns an error if serialization or any write fails.
pub(crate) fn render(
    record: &MetadataRecord,
    format: OutputFormat,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> anyhow::Result<Vec<PathBuf>> {
    match format {
        OutputFormat::Console => {
            if output.is_some() {
                tracing::warn!("--output is ignored for console format");
            }
            console::write_record(record, out)?;
            Ok(Vec::new())
        }
        OutputFormat::Json => json::render(record, output, out),
        OutputFormat::Csv => csv::render(record, output, out),
    }
}

/// Writes `contents` to a temporary file beside `path`, then renames it into
/// place.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.persist(path)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "output written");
    Ok(())
}
