//! CSV reading and cell coercion.
//!
//! This module turns bytes into a [`RawTable`] and provides the numeric
//! coercions applied during normalization. It never drops rows itself;
//! that decision belongs to [`crate::normalize`].

use crate::error::Result;
use crate::types::RawTable;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a CSV stream with a header row.
///
/// Ragged rows are accepted: short rows are padded with empty cells and
/// cells beyond the header are ignored.
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(|h| h.to_string()).collect();
    let width = headers.len();

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let mut row: Vec<String> = record.iter().take(width).map(|c| c.to_string()).collect();
        row.resize(width, String::new());
        rows.push(row);
    }

    Ok(RawTable::new(headers, rows))
}

/// Read a CSV file from disk
pub fn read_csv_path(path: &Path) -> Result<RawTable> {
    let file = File::open(path)?;
    read_csv(file)
}

/// Read CSV from an in-memory buffer (an uploaded file, a previous export)
pub fn read_csv_bytes(bytes: &[u8]) -> Result<RawTable> {
    read_csv(bytes)
}

/// Normalize a header label: strip a byte-order mark, trim, lower-case.
pub fn normalize_label(label: &str) -> String {
    label.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Coerce a cell to an integer.
///
/// Integral float spellings such as "19.0" are accepted since spreadsheet
/// exports often write them.
pub fn coerce_integer(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    if let Ok(value) = cell.parse::<i64>() {
        return Some(value);
    }
    let value = coerce_float(cell)?;
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// Coerce a cell to a finite float. "nan" and "inf" are failures.
pub fn coerce_float(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce a charges cell: a finite, non-negative float.
pub fn coerce_charges(cell: &str) -> Option<f64> {
    coerce_float(cell).filter(|v| *v >= 0.0)
}
