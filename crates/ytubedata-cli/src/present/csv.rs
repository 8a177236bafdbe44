//! Minimal CSV writer: one header row, one value row, plus an optional
//! sidecar file for the record's list.

use std::io::Write;
use std::path::{Path, PathBuf};

use ytubedata_core::MetadataRecord;

use super::{list_table, write_atomic};

pub(crate) fn render(
    record: &MetadataRecord,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> anyhow::Result<Vec<PathBuf>> {
    let (labels, values): (Vec<&str>, Vec<String>) = record.scalar_fields().into_iter().unzip();
    let mut text = String::new();
    push_row(&mut text, labels);
    push_row(&mut text, values.iter().map(String::as_str));

    let Some(path) = output else {
        // The list has nowhere to go on stdout.
        out.write_all(text.as_bytes())?;
        return Ok(Vec::new());
    };

    write_atomic(path, text.as_bytes())?;
    let mut written = vec![path.to_path_buf()];

    if let Some(list) = list_table(record) {
        let mut list_text = String::new();
        push_row(&mut list_text, list.headers.iter().copied());
        for row in &list.rows {
            push_row(&mut list_text, row.iter().map(String::as_str));
        }
        let sidecar = sidecar_path(path, list.suffix);
        write_atomic(&sidecar, list_text.as_bytes())?;
        written.push(sidecar);
    }
    Ok(written)
}

fn push_row<'a>(buf: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        buf.push_str(&escape(field));
    }
    buf.push('\n');
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

/// `out.csv` -> `out_<suffix>.csv`; a path without `.csv` gets the suffix
/// appended.
fn sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    let text = path.to_string_lossy();
    let base = text.strip_suffix(".csv").unwrap_or(&text);
    PathBuf::from(format!("{base}_{suffix}.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ytubedata_core::{SizeMb, StreamDescriptor, VideoRecord};

    fn video_with_stream() -> MetadataRecord {
        let mut video = VideoRecord::unavailable("abc");
        video.title = "Hello, \"World\"".to_owned();
        video.keywords = vec!["a".to_owned(), "b".to_owned()];
        video.streams.push(StreamDescriptor {
            format_tag: 22,
            resolution: "720p".to_owned(),
            mime_type: "video/mp4".to_owned(),
            fps: "30".to_owned(),
            size_mb: SizeMb::Megabytes(10.0),
        });
        MetadataRecord::Video(video)
    }

    #[test]
    fn escape_quotes_only_when_needed() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn sidecar_path_replaces_or_appends_extension() {
        assert_eq!(
            sidecar_path(Path::new("dir/out.csv"), "streams"),
            PathBuf::from("dir/out_streams.csv")
        );
        assert_eq!(
            sidecar_path(Path::new("out"), "videos"),
            PathBuf::from("out_videos.csv")
        );
    }

    #[test]
    fn stdout_gets_scalar_rows_only() {
        let mut out = Vec::new();
        let written = render(&video_with_stream(), None, &mut out).unwrap();
        assert!(written.is_empty());

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Title,Description,Video ID"));
        assert!(lines[1].starts_with("\"Hello, \"\"World\"\"\",unavailable,abc"));
        assert!(lines[1].contains("\"a, b\""));
        assert!(!text.contains("720p"));
    }

    #[test]
    fn file_output_writes_streams_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video.csv");
        let mut out = Vec::new();

        let written = render(&video_with_stream(), Some(&path), &mut out).unwrap();

        let sidecar = dir.path().join("video_streams.csv");
        assert_eq!(written, vec![path.clone(), sidecar.clone()]);
        assert!(out.is_empty());
        let streams = std::fs::read_to_string(sidecar).unwrap();
        assert_eq!(
            streams,
            "itag,Resolution,Type,FPS,Size (MB)\n22,720p,video/mp4,30,10.0\n"
        );
    }

    #[test]
    fn empty_list_writes_no_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video.csv");
        let record = MetadataRecord::Video(VideoRecord::unavailable("abc"));

        let written = render(&record, Some(&path), &mut Vec::new()).unwrap();

        assert_eq!(written, vec![path]);
        assert!(!dir.path().join("video_streams.csv").exists());
    }
}
