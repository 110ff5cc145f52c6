//! CSV decoding.

use crate::error::ImportResult;
use crate::types::RawGrid;

/// How CSV text is split into cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CsvMode {
    /// Split lines on newlines and cells on every comma, then strip surrounding quotes and
    /// whitespace. Quoted commas and embedded newlines are not understood.
    #[default]
    Naive,
    /// Full RFC 4180 grammar via the `csv` crate (quoted commas, `""` escapes, embedded
    /// newlines). Rows are still trimmed and blank rows dropped.
    Quoted,
}

/// Decode CSV bytes into a [`RawGrid`].
///
/// Rules (both modes):
///
/// - Input must be UTF-8; a leading byte-order mark is ignored.
/// - Blank lines are discarded.
/// - Every cell is trimmed.
pub fn decode_csv(bytes: &[u8], mode: CsvMode) -> ImportResult<RawGrid> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    match mode {
        CsvMode::Naive => Ok(decode_naive(text)),
        CsvMode::Quoted => decode_quoted(text),
    }
}

fn decode_naive(text: &str) -> RawGrid {
    let rows = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(',').map(clean_cell).collect())
        .collect();
    RawGrid::new(rows)
}

fn clean_cell(raw: &str) -> String {
    let s = raw.trim();
    let s = s.strip_prefix('"').unwrap_or(s);
    let s = s.strip_suffix('"').unwrap_or(s);
    s.trim().to_owned()
}

fn decode_quoted(text: &str) -> ImportResult<RawGrid> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(::csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.iter().all(|c| c.is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(RawGrid::new(rows))
}
