//! CSV rendering of the monthly projection.
//!
//! ## Layout
//!
//! | Column         | Type    | Notes                          |
//! |----------------|---------|--------------------------------|
//! | `Month`        | integer | 1-based                        |
//! | `Base`         | decimal | plain digits, no currency      |
//! | `Optimistic`   | decimal | plain digits, no currency      |
//! | `Conservative` | decimal | plain digits, no currency      |
//!
//! ```csv
//! Month,Base,Optimistic,Conservative
//! 1,3200,3210.5,3191
//! 2,6400,6425.25,6373
//! ```

use std::io::Write;

use csv::{StringRecord, Terminator, WriterBuilder};

use crate::analysis::align_series;
use crate::models::ForecastResponse;

use super::ExportError;

/// Suggested file name for the download.
pub const CSV_FILE_NAME: &str = "financial_projection.csv";

/// MIME type for the download.
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// Header row, in column order.
pub const CSV_HEADER: [&str; 4] = ["Month", "Base", "Optimistic", "Conservative"];

/// Builds the header row followed by one row per month.
///
/// A forecast with no months yields only the header.
///
/// # Errors
/// [`ExportError::Malformed`] when the scenario series differ in length.
pub fn to_csv_rows(response: &ForecastResponse) -> Result<Vec<StringRecord>, ExportError> {
    let chart = align_series(response)?;

    let mut rows = Vec::with_capacity(chart.len() + 1);
    rows.push(StringRecord::from(CSV_HEADER.to_vec()));
    rows.extend(chart.iter().map(|point| {
        StringRecord::from(vec![
            point.month.to_string(),
            point.base.normalize().to_string(),
            point.optimistic.normalize().to_string(),
            point.conservative.normalize().to_string(),
        ])
    }));
    Ok(rows)
}

/// Writes rows comma-delimited, each terminated by `\n`.
pub fn write_csv<W: Write>(
    rows: &[StringRecord],
    writer: W,
) -> Result<(), ExportError> {
    let mut csv_writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    for row in rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Renders the full CSV document as a string.
pub fn to_csv_string(response: &ForecastResponse) -> Result<String, ExportError> {
    let rows = to_csv_rows(response)?;
    let mut buffer = Vec::new();
    write_csv(&rows, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| ExportError::Encoding(e.to_string()))
}
