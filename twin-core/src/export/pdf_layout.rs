//! Page layout for the PDF report.
//!
//! The layout is a contract for an external renderer: page 1 carries the
//! title, the echoed inputs and the four summary figures, page 2 carries a
//! snapshot of the projection chart. Nothing here draws or rasterizes.

use std::fmt;

use serde::Serialize;

use crate::common::format_currency;
use crate::models::{ForecastRequest, ForecastResponse};

/// Suggested file name for the download.
pub const PDF_FILE_NAME: &str = "financial_projection.pdf";

/// Heading on page 1.
pub const PDF_TITLE: &str = "Financial Projection";

/// A labelled line of text, e.g. `Salary: $5000.00`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelledValue {
    pub label: String,
    pub value: String,
}

impl fmt::Display for LabelledValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// One block of a page, in render order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum PdfSection {
    Title(String),
    /// Salary first, then each expense in breakdown order.
    Inputs(Vec<LabelledValue>),
    /// The four horizons, each `$x.yy`.
    Summary(Vec<LabelledValue>),
    /// Where the renderer places its chart snapshot.
    ChartImage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdfPage {
    pub sections: Vec<PdfSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdfLayout {
    pub pages: Vec<PdfPage>,
}

/// Declares the two-page report for one request and its forecast.
pub fn to_pdf_sections(
    request: &ForecastRequest,
    response: &ForecastResponse,
) -> PdfLayout {
    let mut inputs = Vec::with_capacity(request.expenses.len() + 1);
    inputs.push(LabelledValue {
        label: "Salary".to_string(),
        value: format_currency(request.salary),
    });
    inputs.extend(request.expenses.iter().map(|item| LabelledValue {
        label: item.category.clone(),
        value: format_currency(item.amount),
    }));

    let summary = response
        .summary
        .labelled()
        .into_iter()
        .map(|(label, value)| LabelledValue {
            label: label.to_string(),
            value: format_currency(value),
        })
        .collect();

    PdfLayout {
        pages: vec![
            PdfPage {
                sections: vec![
                    PdfSection::Title(PDF_TITLE.to_string()),
                    PdfSection::Inputs(inputs),
                    PdfSection::Summary(summary),
                ],
            },
            PdfPage {
                sections: vec![PdfSection::ChartImage],
            },
        ],
    }
}

impl fmt::Display for PdfLayout {
    /// Plain-text outline of the layout, one page after another.
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (index, page) in self.pages.iter().enumerate() {
            writeln!(f, "--- page {} ---", index + 1)?;
            for section in &page.sections {
                match section {
                    PdfSection::Title(title) => writeln!(f, "{title}")?,
                    PdfSection::Inputs(lines) | PdfSection::Summary(lines) => {
                        for line in lines {
                            writeln!(f, "  {line}")?;
                        }
                    }
                    PdfSection::ChartImage => writeln!(f, "  [chart]")?,
                }
            }
        }
        Ok(())
    }
}
