#![cfg(feature = "excel")]

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::{ImportError, ImportResult};
use crate::types::RawGrid;

/// Decode an in-memory workbook (`.xlsx`, `.xls`, `.xlsm`, `.xlsb`, `.ods`) into a [`RawGrid`].
///
/// Behavior:
/// - Uses the first sheet in the workbook; later sheets are ignored
/// - Converts every cell to its display string, row-major
/// - Drops rows whose cells are all empty
pub fn decode_workbook(bytes: &[u8]) -> ImportResult<RawGrid> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ImportError::Excel(calamine::Error::Msg("workbook has no sheets")))?;
    let range = workbook.worksheet_range(&first)?;
    tracing::debug!(sheet = %first, height = range.height(), "decoding first worksheet");

    let rows = range
        .rows()
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    Ok(RawGrid::new(rows))
}

fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_owned(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => ndt.date().format("%Y-%m-%d").to_string(),
            None => dt.to_string(),
        },
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}
