use crate::models::{FileHit, SearchOutcome};
use crate::state::AppState;

/// Search the active file
///
/// An empty query resets the preview to its unfiltered state.
pub fn search_active(query: String, state: &AppState) -> Result<SearchOutcome, String> {
    let mut session = state.session()?;
    log::debug!("Searching active file for: '{}'", query);
    Ok(session.set_query(&query))
}

/// Search every uploaded file
pub fn search_everywhere(query: String, state: &AppState) -> Result<Vec<FileHit>, String> {
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let session = state.session()?;
    let hits = session.search_all(&query);
    log::info!("Search for '{}': {} files matched", query, hits.len());
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::upload_files;
    use crate::models::IncomingFile;

    #[test]
    fn test_search_commands() {
        let state = AppState::default();
        upload_files(
            vec![IncomingFile::new("notes.txt", "text/plain", b"hello world".to_vec())],
            &state,
        )
        .unwrap();

        assert!(search_active("WORLD".into(), &state).unwrap().is_match());
        assert_eq!(
            search_active("".into(), &state).unwrap(),
            SearchOutcome::Cleared
        );
        assert_eq!(search_everywhere("hello".into(), &state).unwrap().len(), 1);
        assert!(search_everywhere("".into(), &state).unwrap().is_empty());
    }
}
