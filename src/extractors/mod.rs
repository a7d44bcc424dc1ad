//! Document content extractors
//!
//! Turns the raw bytes of an uploaded file into an `ExtractionResult`:
//! - DOCX (Microsoft Word) -> plain text
//! - PPTX (Microsoft PowerPoint) -> one string per slide
//! - XLSX/XLS (Microsoft Excel) -> first sheet as a table
//! - PDF -> plain text
//! - TXT -> plain text

mod docx;
mod pdf;
mod pptx;
mod text;
mod xlsx;

pub use docx::extract_docx;
pub use pdf::extract_pdf;
pub use pptx::extract_pptx;
pub use text::extract_text;
pub use xlsx::extract_spreadsheet;

use rayon::prelude::*;

use crate::error::ExtractError;
use crate::format::DocumentFormat;
use crate::models::ExtractionResult;

/// Extract content for a classified file
pub fn extract(format: DocumentFormat, bytes: &[u8]) -> Result<ExtractionResult, ExtractError> {
    let result = match format {
        DocumentFormat::Text => extract_text(bytes).map(ExtractionResult::PlainText)?,
        DocumentFormat::Docx => extract_docx(bytes).map(ExtractionResult::PlainText)?,
        DocumentFormat::Pdf => extract_pdf(bytes).map(ExtractionResult::PlainText)?,
        DocumentFormat::Spreadsheet => extract_spreadsheet(bytes).map(ExtractionResult::Table)?,
        DocumentFormat::Slides => extract_pptx(bytes).map(ExtractionResult::Slides)?,
        DocumentFormat::Unsupported => {
            return Err(ExtractError::Unsupported("unsupported format".to_string()))
        }
    };

    if result.is_empty() {
        return Err(ExtractError::Empty);
    }
    debug_assert!(result.matches_format(format));
    Ok(result)
}

/// Extract several files in parallel
///
/// Each job is independent; one failure leaves the others untouched.
pub fn extract_batch(
    jobs: &[(DocumentFormat, &[u8])],
) -> Vec<Result<ExtractionResult, ExtractError>> {
    jobs.par_iter()
        .map(|(format, bytes)| extract(*format, bytes))
        .collect()
}
