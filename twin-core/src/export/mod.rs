//! Export formatting for CSV downloads and the PDF report.
//!
//! These functions only shape data; writing files and drawing pages belong
//! to the caller.

mod csv_rows;
mod pdf_layout;

use thiserror::Error;

use crate::models::MalformedResponse;

pub use csv_rows::{CSV_FILE_NAME, CSV_HEADER, CSV_MIME_TYPE, to_csv_rows, to_csv_string, write_csv};
pub use pdf_layout::{
    LabelledValue, PDF_FILE_NAME, PDF_TITLE, PdfLayout, PdfPage, PdfSection, to_pdf_sections,
};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Malformed(#[from] MalformedResponse),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export is not valid UTF-8: {0}")]
    Encoding(String),
}
