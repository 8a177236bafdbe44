use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use ytubedata_core::MetadataRecord;

use super::write_atomic;

pub(crate) fn render(
    record: &MetadataRecord,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> anyhow::Result<Vec<PathBuf>> {
    let text = to_pretty_json(record)?;
    match output {
        Some(path) => {
            write_atomic(path, text.as_bytes())?;
            Ok(vec![path.to_path_buf()])
        }
        None => {
            writeln!(out, "{text}")?;
            Ok(Vec::new())
        }
    }
}

/// Pretty-prints with a four-space indent; non-ASCII text is kept as is.
fn to_pretty_json(record: &MetadataRecord) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record.serialize(&mut ser)?;
    // serde_json only ever emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
