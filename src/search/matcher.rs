use super::SearchQuery;
use crate::models::{ExtractionResult, MatchedRow, MatchedSlide, SearchOutcome, Table};

/// Search the active file's content
///
/// An empty query clears the search. Text matches carry highlight spans,
/// tables are filtered to the body rows containing the query (header kept
/// apart), and slides are filtered to the ones containing it, numbered by
/// their position in the original deck.
pub fn search(query: &str, content: &ExtractionResult) -> SearchOutcome {
    let Some(query) = SearchQuery::new(query) else {
        return SearchOutcome::Cleared;
    };

    let outcome = match content {
        ExtractionResult::PlainText(text) => {
            let spans = query.spans(text);
            (!spans.is_empty()).then_some(SearchOutcome::Text { spans })
        }
        ExtractionResult::Table(table) => {
            let rows = filter_rows(table, &query);
            (!rows.is_empty()).then(|| SearchOutcome::Table {
                header: table.header.clone(),
                rows,
            })
        }
        ExtractionResult::Slides(slides) => {
            let slides = filter_slides(slides, &query);
            (!slides.is_empty()).then_some(SearchOutcome::Slides { slides })
        }
    };

    outcome.unwrap_or_else(|| SearchOutcome::no_match(query.as_str()))
}

fn filter_rows(table: &Table, query: &SearchQuery) -> Vec<MatchedRow> {
    table
        .rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let spans: Vec<_> = row.iter().map(|cell| query.spans(&cell.to_string())).collect();
            spans.iter().any(|s| !s.is_empty()).then(|| MatchedRow {
                index,
                cells: row.clone(),
                spans,
            })
        })
        .collect()
}

fn filter_slides(slides: &[String], query: &SearchQuery) -> Vec<MatchedSlide> {
    slides
        .iter()
        .enumerate()
        .filter_map(|(i, text)| {
            let spans = query.spans(text);
            (!spans.is_empty()).then(|| MatchedSlide {
                number: i + 1,
                text: text.clone(),
                spans,
            })
        })
        .collect()
}
