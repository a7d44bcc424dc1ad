use rayon::prelude::*;

use super::{find_matches_in_content, searchable_text, SearchQuery};
use crate::config::Config;
use crate::format::DocumentFormat;
use crate::models::{ExtractionResult, FileHit, Match};

/// A file that has extracted content and can be searched
pub struct SearchableFile<'a> {
    pub index: usize,
    pub name: &'a str,
    pub format: DocumentFormat,
    pub content: &'a ExtractionResult,
}

/// Direct substring search through every extracted file
///
/// Files are scanned in parallel. Each hit keeps up to `max_hits_per_file`
/// context snippets; results come back in upload order. A name-only hit is
/// reported with a single "Filename:" context.
pub fn search_files(query: &str, files: &[SearchableFile<'_>], config: &Config) -> Vec<FileHit> {
    let Some(query) = SearchQuery::new(query) else {
        return Vec::new();
    };

    let mut hits: Vec<FileHit> = files
        .par_iter()
        .filter_map(|file| {
            let text = searchable_text(file.content);
            let hit_count = query.spans(&text).len();
            let mut matches = find_matches_in_content(
                &text,
                &query,
                config.max_hits_per_file,
                config.context_chars,
            );

            if matches.is_empty() && query.is_match(file.name) {
                matches.push(Match {
                    text: query.as_str().to_string(),
                    index: 0,
                    context: format!("Filename: {}", file.name),
                });
            }
            if matches.is_empty() {
                return None;
            }

            Some(FileHit {
                file_index: file.index,
                name: file.name.to_string(),
                format: file.format,
                hit_count,
                matches,
            })
        })
        .collect();

    hits.sort_by_key(|h| h.file_index);
    hits
}
