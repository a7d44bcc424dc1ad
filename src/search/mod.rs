//! Search functionality
//!
//! This module provides search capabilities:
//! - Case-insensitive literal matching with highlight spans
//! - Per-format matching against the active file (text, table rows, slides)
//! - Direct content search across every uploaded file

mod direct_search;
mod matcher;

pub use direct_search::{search_files, SearchableFile};
pub use matcher::search;

use regex::{Regex, RegexBuilder};

use crate::models::{ExtractionResult, HighlightSpan, Match};

/// A non-empty, case-insensitive literal query
///
/// Regex metacharacters in the input match themselves.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    raw: String,
    pattern: Option<Regex>,
}

impl SearchQuery {
    /// `None` for the empty query, which means "show everything"
    pub fn new(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let pattern = RegexBuilder::new(&regex::escape(raw))
            .case_insensitive(true)
            .build()
            .map_err(|e| log::warn!("Query cannot be compiled, it will match nothing: {}", e))
            .ok();
        Some(Self {
            raw: raw.to_string(),
            pattern,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(text))
    }

    /// Byte ranges of every hit, in order and non-overlapping
    pub fn spans(&self, text: &str) -> Vec<HighlightSpan> {
        match &self.pattern {
            Some(p) => p
                .find_iter(text)
                .map(|m| HighlightSpan {
                    start: m.start(),
                    end: m.end(),
                })
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Highlight spans of `query` in `text`; empty for an empty query
pub fn find_highlights(text: &str, query: &str) -> Vec<HighlightSpan> {
    SearchQuery::new(query)
        .map(|q| q.spans(text))
        .unwrap_or_default()
}

/// Flatten extracted content into one searchable string
///
/// Tables become one tab-separated line per row (header first); slides become
/// `Slide N: text` lines.
pub fn searchable_text(content: &ExtractionResult) -> String {
    match content {
        ExtractionResult::PlainText(text) => text.clone(),
        ExtractionResult::Table(table) => std::iter::once(&table.header)
            .chain(table.rows.iter())
            .map(|row| {
                row.iter()
                    .map(|cell| cell.to_string())
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n"),
        ExtractionResult::Slides(slides) => slides
            .iter()
            .enumerate()
            .map(|(i, text)| format!("Slide {}: {}", i + 1, text))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Find matches in content and return Match structs with context
pub fn find_matches_in_content(
    content: &str,
    query: &SearchQuery,
    limit: usize,
    context_chars: usize,
) -> Vec<Match> {
    query
        .spans(content)
        .into_iter()
        .take(limit)
        .map(|span| Match {
            text: content[span.start..span.end].to_string(),
            index: span.start,
            context: get_context_around_match(
                content,
                span.start,
                span.end - span.start,
                context_chars,
            ),
        })
        .collect()
}

/// Safely extract context around a match, respecting UTF-8 character boundaries
pub fn get_context_around_match(
    content: &str,
    match_byte_idx: usize,
    match_len: usize,
    context_chars: usize,
) -> String {
    let char_indices: Vec<(usize, char)> = content.char_indices().collect();

    // Char positions of the match start and end
    let match_start_char = char_indices
        .iter()
        .position(|(byte_pos, _)| *byte_pos >= match_byte_idx)
        .unwrap_or(char_indices.len());
    let match_end_char = char_indices
        .iter()
        .position(|(byte_pos, _)| *byte_pos >= match_byte_idx + match_len)
        .unwrap_or(char_indices.len());

    let start_char = match_start_char.saturating_sub(context_chars);
    let end_char = (match_end_char + context_chars).min(char_indices.len());

    let start_byte = char_indices.get(start_char).map(|(b, _)| *b).unwrap_or(0);
    let end_byte = char_indices
        .get(end_char)
        .map(|(b, _)| *b)
        .unwrap_or(content.len());

    content[start_byte..end_byte].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellValue, Table};

    #[test]
    fn test_spans_are_case_insensitive_and_in_original_text() {
        let text = "World, hello world. WORLD!";
        let spans = find_highlights(text, "world");
        assert_eq!(spans.len(), 3);
        assert_eq!(&text[spans[0].start..spans[0].end], "World");
        assert_eq!(&text[spans[2].start..spans[2].end], "WORLD");
    }

    #[test]
    fn test_metacharacters_are_literal() {
        assert!(find_highlights("cost (USD)", "(usd)").len() == 1);
        assert!(find_highlights("a.b", "a*").is_empty());
        assert!(SearchQuery::new("1+1").unwrap().is_match("is 1+1 two"));
    }

    #[test]
    fn test_empty_query_has_no_spans() {
        assert!(SearchQuery::new("").is_none());
        assert!(find_highlights("anything", "").is_empty());
    }

    #[test]
    fn test_context_respects_char_boundaries() {
        let text = "ééééé target ééééé";
        let query = SearchQuery::new("target").unwrap();
        let matches = find_matches_in_content(text, &query, 5, 3);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].context, "éé target é");
        assert_eq!(matches[0].text, "target");
    }

    #[test]
    fn test_searchable_text_flattens_shapes() {
        let table = ExtractionResult::Table(Table {
            header: vec![CellValue::from("Name"), CellValue::from("Amount")],
            rows: vec![vec![CellValue::from("Coffee"), CellValue::Float(5.0)]],
        });
        assert_eq!(searchable_text(&table), "Name\tAmount\nCoffee\t5");

        let slides = ExtractionResult::Slides(vec!["a".into(), "b".into()]);
        assert_eq!(searchable_text(&slides), "Slide 1: a\nSlide 2: b");
    }
}
