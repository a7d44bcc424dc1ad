use crate::models::{FileSummary, IncomingFile, Notice};
use crate::preview::PreviewMode;
use crate::session::DropReport;
use crate::state::AppState;

/// Drop or select files
pub fn upload_files(files: Vec<IncomingFile>, state: &AppState) -> Result<DropReport, String> {
    let mut session = state.session()?;
    let report = session.add_files(files);
    log::info!(
        "Drop finished: {} accepted, {} rejected",
        report.accepted.len(),
        report.rejected.len()
    );
    Ok(report)
}

/// Make a file the active one
pub fn select_file(index: usize, state: &AppState) -> Result<PreviewMode, String> {
    state.session()?.select(index).map_err(|e| e.to_string())
}

/// Remove a single file and release its preview URL
pub fn remove_file(index: usize, state: &AppState) -> Result<(), String> {
    state.session()?.remove(index).map_err(|e| e.to_string())
}

/// Remove every file
pub fn remove_all_files(state: &AppState) -> Result<(), String> {
    state.session()?.remove_all();
    Ok(())
}

pub fn list_files(state: &AppState) -> Result<Vec<FileSummary>, String> {
    Ok(state.session()?.summaries())
}

/// Drain pending notifications
pub fn take_notices(state: &AppState) -> Result<Vec<Notice>, String> {
    Ok(state.session()?.take_notices())
}
