//! Export - Delimited Text Export
//!
//! Writes a table's filtered (pre-pagination) row set as CSV for download:
//! one header row of column labels, then one line per record. Values
//! containing commas, quotes or newlines are quoted per RFC 4180.

use std::io::Write;

use crate::domain::record::Record;
use crate::error::{Error, Result};
use crate::table::column::Column;

/// Write `rows` as CSV to `writer`, one cell per column
pub fn write_csv<W: Write>(rows: &[&Record], columns: &[Column], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(columns.iter().map(|c| c.label.as_str()))?;
    for record in rows {
        wtr.write_record(columns.iter().map(|c| c.value_of(record).canonical()))?;
    }
    wtr.flush()?;

    tracing::debug!("Exported {} records across {} columns", rows.len(), columns.len());
    Ok(())
}

/// Render `rows` as a CSV string
pub fn csv_string(rows: &[&Record], columns: &[Column]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(rows, columns, &mut buf)?;
    String::from_utf8(buf).map_err(|e| Error::Invalid {
        message: format!("CSV output was not UTF-8: {e}"),
    })
}
