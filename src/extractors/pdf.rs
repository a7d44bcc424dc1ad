use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::ExtractError;

/// Text layer of a PDF, trimmed
///
/// Only PDFs with selectable text yield anything; scanned pages come back
/// empty and no OCR is attempted.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    // pdf-extract panics on some malformed inputs
    let text = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
        .map_err(|_| ExtractError::Pdf("parser panicked".to_string()))?
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;
    Ok(text.trim().to_string())
}
