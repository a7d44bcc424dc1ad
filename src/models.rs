use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format::DocumentFormat;

/// A file handed to the drop surface, before intake
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Identity and status of an uploaded file, as listed to the user
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FileSummary {
    pub id: u64,
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub format: DocumentFormat,
    pub added_at: DateTime<Utc>,
    pub preview_url: String,
    pub extracted: bool,
    pub active: bool,
}

// ============================================================================
// Extracted content
// ============================================================================

/// Normalized, searchable content of one file
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ExtractionResult {
    /// PDF, DOCX and TXT
    PlainText(String),
    /// First sheet of a workbook
    Table(Table),
    /// Slide texts in deck order
    Slides(Vec<String>),
}

impl ExtractionResult {
    /// Whether this variant is the one `format` is expected to produce
    pub fn matches_format(&self, format: DocumentFormat) -> bool {
        matches!(
            (self, format),
            (ExtractionResult::PlainText(_), DocumentFormat::Pdf)
                | (ExtractionResult::PlainText(_), DocumentFormat::Docx)
                | (ExtractionResult::PlainText(_), DocumentFormat::Text)
                | (ExtractionResult::Table(_), DocumentFormat::Spreadsheet)
                | (ExtractionResult::Slides(_), DocumentFormat::Slides)
        )
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ExtractionResult::PlainText(text) => text.is_empty(),
            ExtractionResult::Table(table) => table.header.is_empty() && table.rows.is_empty(),
            ExtractionResult::Slides(slides) => slides.is_empty(),
        }
    }
}

/// Tabular content; `header` is the sheet's first row
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Table {
    pub header: Vec<CellValue>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Split a grid into header and body
    pub fn from_rows(mut rows: Vec<Vec<CellValue>>) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let header = rows.remove(0);
        Self { header, rows }
    }
}

/// A single spreadsheet cell
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Already formatted date or duration
    DateTime(String),
    /// Formula error such as `#DIV/0!`
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) | CellValue::DateTime(s) | CellValue::Error(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Bool(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

// ============================================================================
// Search
// ============================================================================

/// Byte range of a query hit inside a piece of text
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
}

/// A body row that survived table filtering
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MatchedRow {
    /// Position among the body rows of the original table
    pub index: usize,
    pub cells: Vec<CellValue>,
    /// Hits per cell, parallel to `cells`
    pub spans: Vec<Vec<HighlightSpan>>,
}

/// A slide that contains the query
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MatchedSlide {
    /// 1-based position in the original deck
    pub number: usize,
    pub text: String,
    pub spans: Vec<HighlightSpan>,
}

/// Result of searching the active file
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// No query: show everything
    Cleared,
    NoMatch {
        query: String,
    },
    Text {
        spans: Vec<HighlightSpan>,
    },
    Table {
        header: Vec<CellValue>,
        rows: Vec<MatchedRow>,
    },
    Slides {
        slides: Vec<MatchedSlide>,
    },
}

impl SearchOutcome {
    pub fn no_match(query: &str) -> Self {
        SearchOutcome::NoMatch {
            query: query.to_string(),
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(
            self,
            SearchOutcome::Text { .. } | SearchOutcome::Table { .. } | SearchOutcome::Slides { .. }
        )
    }

    /// Informational message shown when nothing matched
    pub fn message(&self) -> Option<String> {
        match self {
            SearchOutcome::NoMatch { query } => Some(format!("No matches found for \"{}\"", query)),
            _ => None,
        }
    }

    /// Matched slides joined for display, one per line
    pub fn joined_text(&self) -> Option<String> {
        match self {
            SearchOutcome::Slides { slides } => Some(
                slides
                    .iter()
                    .map(|s| s.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            _ => None,
        }
    }
}

/// Individual hit within a document, with surrounding context
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Match {
    pub text: String,
    pub index: usize,
    pub context: String,
}

/// Per-file result of a search across every uploaded file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FileHit {
    pub file_index: usize,
    pub name: String,
    pub format: DocumentFormat,
    pub hit_count: usize,
    pub matches: Vec<Match>,
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Transient user-facing notification
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: Utc::now(),
        }
    }
}
