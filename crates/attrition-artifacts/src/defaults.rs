//! Reading the single-row defaults table.

use std::io::Read;

use attrition_core::RawRow;

use crate::error::LoadFailure;

/// Parse a CSV table with a header and one data row into a [`RawRow`].
///
/// Every cell is kept as its raw string; nothing is type-inferred. Rows after
/// the first are ignored with a warning.
///
/// # Errors
///
/// Returns [`LoadFailure::Csv`] for malformed or ragged CSV and
/// [`LoadFailure::Table`] for a missing header, no data row, or duplicate
/// column names.
pub fn read_defaults_row<R: Read>(reader: R) -> Result<RawRow, LoadFailure> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    if columns.is_empty() || columns.iter().all(String::is_empty) {
        return Err(LoadFailure::Table("header row is empty".into()));
    }

    let mut records = reader.records();
    let first = records
        .next()
        .ok_or_else(|| LoadFailure::Table("no data row after the header".into()))??;

    let ignored = records.count();
    if ignored > 0 {
        tracing::warn!(ignored, "defaults table has extra rows; using the first");
    }

    let values = first.iter().map(String::from).collect();
    RawRow::new(columns, values).map_err(|error| LoadFailure::Table(error.to_string()))
}
