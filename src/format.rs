//! Format classification
//!
//! The single place that turns a MIME type and file name into a format tag.
//! Extraction, search and preview selection all consume the tag instead of
//! re-deriving it from the name.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    /// XLSX and XLS
    Spreadsheet,
    /// PPTX
    Slides,
    Text,
    Unsupported,
}

impl DocumentFormat {
    pub fn is_supported(self) -> bool {
        self != DocumentFormat::Unsupported
    }

    /// Display name used in notices
    pub fn label(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Docx => "DOCX",
            DocumentFormat::Spreadsheet => "Excel File",
            DocumentFormat::Slides => "PPTX",
            DocumentFormat::Text => "Text File",
            DocumentFormat::Unsupported => "Unsupported File",
        }
    }
}

/// Classify an uploaded file
///
/// Some browsers report generic or missing MIME types for office formats, so
/// the extension wins for docx/xlsx/xls/pptx. PDF and plain text are trusted
/// to their MIME type.
pub fn classify(mime: &str, file_name: &str) -> DocumentFormat {
    let by_extension = match extension(file_name).as_deref() {
        Some("docx") => Some(DocumentFormat::Docx),
        Some("xlsx") | Some("xls") => Some(DocumentFormat::Spreadsheet),
        Some("pptx") => Some(DocumentFormat::Slides),
        _ => None,
    };
    if let Some(format) = by_extension {
        return format;
    }

    match mime.trim().to_lowercase().as_str() {
        "application/pdf" => DocumentFormat::Pdf,
        "text/plain" => DocumentFormat::Text,
        _ => DocumentFormat::Unsupported,
    }
}

/// Lowercased extension of a file name
pub fn extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Guess the MIME type a browser would report for a file on disk
pub fn mime_for_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}
