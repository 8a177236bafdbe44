//! Human-readable rendering of raw scalar values.
//!
//! Every function here is total: a value that cannot be interpreted is either
//! echoed back verbatim or replaced by [`UNAVAILABLE`], never turned into an
//! error. "Falsy" inputs (missing, empty text, integer zero) map to the
//! sentinel.

use chrono::NaiveDate;

use crate::types::{SizeMb, UNAVAILABLE};

const DESCRIPTION_LIMIT: usize = 200;
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// A raw scalar as handed over by an extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue<'a> {
    Missing,
    Int(i64),
    Text(&'a str),
}

impl From<i64> for RawValue<'_> {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<i32> for RawValue<'_> {
    fn from(value: i32) -> Self {
        RawValue::Int(i64::from(value))
    }
}

impl From<u32> for RawValue<'_> {
    fn from(value: u32) -> Self {
        RawValue::Int(i64::from(value))
    }
}

impl From<u64> for RawValue<'_> {
    fn from(value: u64) -> Self {
        RawValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(value: &'a str) -> Self {
        RawValue::Text(value)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(value: &'a String) -> Self {
        RawValue::Text(value.as_str())
    }
}

impl<'a, T> From<Option<T>> for RawValue<'a>
where
    T: Into<RawValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Missing, Into::into)
    }
}

/// Renders an 8-digit `YYYYMMDD` value as `YYYY-MM-DD`.
///
/// Missing or empty input yields the sentinel; anything that is not a valid
/// `YYYYMMDD` calendar date is returned unchanged.
pub fn format_date<'a>(raw: impl Into<RawValue<'a>>) -> String {
    match raw.into() {
        RawValue::Missing | RawValue::Text("") => UNAVAILABLE.to_owned(),
        RawValue::Int(n) => reformat_date(&n.to_string()),
        RawValue::Text(s) => reformat_date(s),
    }
}

fn reformat_date(s: &str) -> String {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return s.to_owned();
    }
    NaiveDate::parse_from_str(s, "%Y%m%d")
        .map_or_else(|_| s.to_owned(), |d| d.format("%Y-%m-%d").to_string())
}

/// Renders a duration in seconds as `H:MM:SS`, or `MM:SS` under an hour.
///
/// Zero counts as absent. Text that does not hold an integer is echoed.
pub fn format_duration<'a>(seconds: impl Into<RawValue<'a>>) -> String {
    match seconds.into() {
        RawValue::Missing | RawValue::Int(0) | RawValue::Text("") => UNAVAILABLE.to_owned(),
        RawValue::Int(n) => clock(n),
        RawValue::Text(s) => s.trim().parse::<i64>().map_or_else(|_| s.to_owned(), clock),
    }
}

fn clock(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let total = seconds.unsigned_abs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{sign}{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{sign}{minutes:02}:{secs:02}")
    }
}

/// Inserts `,` thousands separators.
///
/// Integer zero counts as absent; the text `"0"` does not.
pub fn format_number<'a>(n: impl Into<RawValue<'a>>) -> String {
    match n.into() {
        RawValue::Missing | RawValue::Int(0) | RawValue::Text("") => UNAVAILABLE.to_owned(),
        RawValue::Int(n) => group_thousands(n),
        RawValue::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_or_else(|_| s.to_owned(), group_thousands),
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Caps a description at 200 characters, appending `...` when cut.
pub fn truncate_description(text: Option<&str>) -> String {
    match text {
        None | Some("") => UNAVAILABLE.to_owned(),
        Some(s) if s.chars().count() > DESCRIPTION_LIMIT => {
            let head: String = s.chars().take(DESCRIPTION_LIMIT).collect();
            format!("{head}...")
        }
        Some(s) => s.to_owned(),
    }
}

/// Converts a byte count to megabytes rounded to two decimals.
///
/// Unknown and zero sizes are reported as unavailable.
pub fn format_size_mb(size_bytes: Option<u64>) -> SizeMb {
    match size_bytes {
        None | Some(0) => SizeMb::Unavailable,
        Some(bytes) => {
            #[allow(clippy::cast_precision_loss)]
            let mb = bytes as f64 / BYTES_PER_MB;
            SizeMb::Megabytes((mb * 100.0).round() / 100.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_date_reformats_compact_dates() {
        assert_eq!(format_date("20210101"), "2021-01-01");
        assert_eq!(format_date("19991231"), "1999-12-31");
    }

    #[test]
    fn format_date_empty_and_missing_are_unavailable() {
        assert_eq!(format_date(""), UNAVAILABLE);
        assert_eq!(format_date(None::<&str>), UNAVAILABLE);
    }

    #[test]
    fn format_date_passes_through_unparseable_input() {
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_date("2021-01-01"), "2021-01-01");
        assert_eq!(format_date("20211345"), "20211345");
        assert_eq!(format_date("2021011"), "2021011");
    }

    #[test]
    fn format_duration_renders_hours_when_present() {
        assert_eq!(format_duration(3661), "1:01:01");
        assert_eq!(format_duration(36_000), "10:00:00");
    }

    #[test]
    fn format_duration_renders_minutes_and_seconds() {
        assert_eq!(format_duration(61), "01:01");
        assert_eq!(format_duration(59), "00:59");
    }

    #[test]
    fn format_duration_zero_is_treated_as_unavailable() {
        assert_eq!(format_duration(0), UNAVAILABLE);
    }

    #[test]
    fn format_duration_missing_and_empty_are_unavailable() {
        assert_eq!(format_duration(None::<u64>), UNAVAILABLE);
        assert_eq!(format_duration(""), UNAVAILABLE);
    }

    #[test]
    fn format_duration_echoes_non_numeric_text() {
        assert_eq!(format_duration("invalid"), "invalid");
        assert_eq!(format_duration("3661"), "1:01:01");
    }

    #[test]
    fn format_duration_negative_does_not_panic() {
        assert_eq!(format_duration(-61), "-01:01");
    }

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1_000_000), "1,000,000");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(-1_234_567), "-1,234,567");
    }

    #[test]
    fn format_number_zero_is_treated_as_unavailable() {
        assert_eq!(format_number(0), UNAVAILABLE);
    }

    #[test]
    fn format_number_text_zero_is_not_falsy() {
        assert_eq!(format_number("0"), "0");
    }

    #[test]
    fn format_number_missing_and_non_numeric() {
        assert_eq!(format_number(None::<u64>), UNAVAILABLE);
        assert_eq!(format_number(""), UNAVAILABLE);
        assert_eq!(format_number("invalid"), "invalid");
        assert_eq!(format_number("123456"), "123,456");
    }

    #[test]
    fn truncate_description_caps_at_limit() {
        let long = "a".repeat(250);
        let got = truncate_description(Some(&long));
        assert_eq!(got.len(), 203);
        assert!(got.ends_with("..."));
        assert_eq!(truncate_description(Some("short")), "short");
        assert_eq!(truncate_description(None), UNAVAILABLE);
    }

    #[test]
    fn truncate_description_counts_chars_not_bytes() {
        let long = "é".repeat(201);
        let got = truncate_description(Some(&long));
        assert_eq!(got.chars().count(), 203);
    }

    #[test]
    fn format_size_mb_rounds_to_two_decimals() {
        assert_eq!(format_size_mb(Some(10_485_760)), SizeMb::Megabytes(10.0));
        assert_eq!(format_size_mb(Some(1_500_000)), SizeMb::Megabytes(1.43));
        assert_eq!(format_size_mb(None), SizeMb::Unavailable);
        assert_eq!(format_size_mb(Some(0)), SizeMb::Unavailable);
    }
}
