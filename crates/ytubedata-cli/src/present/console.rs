use std::io::{self, Write};

use ytubedata_core::MetadataRecord;

use super::list_table;

/// Prints the key/value table and, when non-empty, the list table.
pub(crate) fn write_record(record: &MetadataRecord, out: &mut dyn Write) -> io::Result<()> {
    let rows: Vec<Vec<String>> = record
        .scalar_fields()
        .into_iter()
        .map(|(label, value)| vec![label.to_owned(), value])
        .collect();
    write_table(out, &record.heading(), &["Field", "Value"], &rows)?;

    if let Some(list) = list_table(record) {
        writeln!(out)?;
        write_table(out, list.title, list.headers, &list.rows)?;
    }
    Ok(())
}

fn write_table(
    out: &mut dyn Write,
    title: &str,
    headers: &[&str],
    rows: &[Vec<String>],
) -> io::Result<()> {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(String::as_str).map(single_line).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = border_line(&widths);
    writeln!(out, "{title}")?;
    writeln!(out, "{border}")?;
    write_row(out, &widths, headers.iter().copied())?;
    writeln!(out, "{border}")?;
    for row in &rows {
        write_row(out, &widths, row.iter().map(String::as_str))?;
    }
    writeln!(out, "{border}")
}

fn border_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

fn write_row<'a>(
    out: &mut dyn Write,
    widths: &[usize],
    cells: impl Iterator<Item = &'a str>,
) -> io::Result<()> {
    let mut line = String::from("|");
    for (cell, width) in cells.zip(widths) {
        let pad = width - cell.chars().count();
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad + 1));
        line.push('|');
    }
    writeln!(out, "{line}")
}

fn single_line(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
