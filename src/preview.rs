//! Preview selection and rendering
//!
//! Exactly one preview mode is active at a time. The view for the active file
//! is assembled from its extracted content and the current search outcome.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::config::ZoomConfig;
use crate::format::DocumentFormat;
use crate::models::{CellValue, ExtractionResult, HighlightSpan, SearchOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    /// Nothing selected yet
    #[default]
    None,
    Pdf,
    Docx,
    Spreadsheet,
    Slides,
    Text,
}

impl PreviewMode {
    pub fn for_format(format: DocumentFormat) -> Self {
        match format {
            DocumentFormat::Pdf => PreviewMode::Pdf,
            DocumentFormat::Docx => PreviewMode::Docx,
            DocumentFormat::Spreadsheet => PreviewMode::Spreadsheet,
            DocumentFormat::Slides => PreviewMode::Slides,
            DocumentFormat::Text => PreviewMode::Text,
            DocumentFormat::Unsupported => PreviewMode::None,
        }
    }

    fn heading(self) -> &'static str {
        match self {
            PreviewMode::None => "",
            PreviewMode::Pdf => "PDF Content:",
            PreviewMode::Docx => "Document Content:",
            PreviewMode::Spreadsheet => "Excel Content:",
            PreviewMode::Slides => "PowerPoint Slides:",
            PreviewMode::Text => "Text Content:",
        }
    }
}

/// Preview zoom in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zoom {
    percent: u32,
    bounds: ZoomConfig,
}

impl Zoom {
    pub fn new(bounds: ZoomConfig) -> Self {
        Self {
            percent: bounds.initial.clamp(bounds.min, bounds.max),
            bounds,
        }
    }

    pub fn percent(&self) -> u32 {
        self.percent
    }

    pub fn scale(&self) -> f32 {
        self.percent as f32 / 100.0
    }

    pub fn zoom_in(&mut self) -> u32 {
        self.percent = (self.percent + self.bounds.step).min(self.bounds.max);
        self.percent
    }

    pub fn zoom_out(&mut self) -> u32 {
        self.percent = self
            .percent
            .saturating_sub(self.bounds.step)
            .max(self.bounds.min);
        self.percent
    }

    pub fn reset(&mut self) {
        self.percent = self.bounds.initial;
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

/// A run of text, highlighted or not
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

/// Cut `text` into plain and highlighted runs along `spans`
pub fn segments(text: &str, spans: &[HighlightSpan]) -> Vec<Segment> {
    let mut out = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;
    for span in spans {
        if span.start > cursor {
            out.push(Segment {
                text: text[cursor..span.start].to_string(),
                highlighted: false,
            });
        }
        out.push(Segment {
            text: text[span.start..span.end].to_string(),
            highlighted: true,
        });
        cursor = span.end;
    }
    if cursor < text.len() || out.is_empty() {
        out.push(Segment {
            text: text[cursor..].to_string(),
            highlighted: false,
        });
    }
    out
}

fn plain(text: &str) -> Vec<Segment> {
    segments(text, &[])
}

/// Name, size and kind shown next to every preview
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    pub kind: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "body", rename_all = "snake_case")]
pub enum PreviewBody {
    /// PDF, DOCX and TXT
    Text {
        segments: Vec<Segment>,
    },
    Table {
        header: Vec<String>,
        rows: Vec<Vec<Vec<Segment>>>,
    },
    Slides {
        slides: Vec<SlideView>,
    },
    /// Extraction failed; nothing to show
    Unavailable {
        reason: String,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SlideView {
    /// 1-based position in the deck
    pub number: usize,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PreviewView {
    pub mode: PreviewMode,
    pub file: FileInfo,
    pub url: String,
    pub zoom_percent: u32,
    pub body: PreviewBody,
    /// "No matches found" message, when a query hit nothing
    pub message: Option<String>,
}

/// Build the body for extracted content under a search outcome
///
/// Without a query (or without a hit) text and slides are shown whole and an
/// unfiltered table shows its first `table_preview_rows` body rows. With a
/// hit, text is highlighted, tables list every matched row and slides list
/// only the matching ones. A table with no hit shows just its header.
pub fn build_body(
    content: &ExtractionResult,
    outcome: &SearchOutcome,
    table_preview_rows: usize,
) -> PreviewBody {
    match (content, outcome) {
        (ExtractionResult::PlainText(text), SearchOutcome::Text { spans }) => PreviewBody::Text {
            segments: segments(text, spans),
        },
        (ExtractionResult::PlainText(text), _) => PreviewBody::Text {
            segments: plain(text),
        },

        (ExtractionResult::Table(_), SearchOutcome::Table { header, rows }) => {
            PreviewBody::Table {
                header: cells_to_strings(header),
                rows: rows
                    .iter()
                    .map(|row| {
                        row.cells
                            .iter()
                            .zip(row.spans.iter())
                            .map(|(cell, spans)| segments(&cell.to_string(), spans))
                            .collect()
                    })
                    .collect(),
            }
        }
        (ExtractionResult::Table(table), SearchOutcome::NoMatch { .. }) => PreviewBody::Table {
            header: cells_to_strings(&table.header),
            rows: Vec::new(),
        },
        (ExtractionResult::Table(table), _) => PreviewBody::Table {
            header: cells_to_strings(&table.header),
            rows: table
                .rows
                .iter()
                .take(table_preview_rows)
                .map(|row| row.iter().map(|cell| plain(&cell.to_string())).collect())
                .collect(),
        },

        (ExtractionResult::Slides(_), SearchOutcome::Slides { slides }) => PreviewBody::Slides {
            slides: slides
                .iter()
                .map(|s| SlideView {
                    number: s.number,
                    segments: segments(&s.text, &s.spans),
                })
                .collect(),
        },
        (ExtractionResult::Slides(slides), _) => PreviewBody::Slides {
            slides: slides
                .iter()
                .enumerate()
                .map(|(i, text)| SlideView {
                    number: i + 1,
                    segments: plain(text),
                })
                .collect(),
        },
    }
}

fn cells_to_strings(cells: &[CellValue]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

fn write_segments(out: &mut String, segments: &[Segment]) {
    for segment in segments {
        if segment.highlighted {
            let _ = write!(out, "[[{}]]", segment.text);
        } else {
            out.push_str(&segment.text);
        }
    }
}

/// Terminal rendering of a view; highlights are wrapped in `[[ ]]`
pub fn render_plain(view: &PreviewView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.mode.heading());
    let _ = writeln!(
        out,
        "Name: {} | Size: {} | Type: {} | Zoom: {}%",
        view.file.name, view.file.size, view.file.kind, view.zoom_percent
    );
    let _ = writeln!(out, "URL: {}", view.url);
    if let Some(message) = &view.message {
        let _ = writeln!(out, "{}", message);
    }
    out.push('\n');

    match &view.body {
        PreviewBody::Text { segments } => {
            write_segments(&mut out, segments);
            out.push('\n');
        }
        PreviewBody::Table { header, rows } => {
            let _ = writeln!(out, "{}", header.join(" | "));
            for row in rows {
                for (i, cell) in row.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    write_segments(&mut out, cell);
                }
                out.push('\n');
            }
        }
        PreviewBody::Slides { slides } => {
            for slide in slides {
                let _ = writeln!(out, "Slide {}:", slide.number);
                write_segments(&mut out, &slide.segments);
                out.push('\n');
            }
        }
        PreviewBody::Unavailable { reason } => {
            let _ = writeln!(out, "Preview unavailable: {}", reason);
        }
    }
    out
}
