use crate::preview::PreviewView;
use crate::state::AppState;

/// Preview of the active file, or `None` when nothing is selected
pub fn get_preview(state: &AppState) -> Result<Option<PreviewView>, String> {
    Ok(state.session()?.view())
}

pub fn zoom_in(state: &AppState) -> Result<u32, String> {
    Ok(state.session()?.zoom_in())
}

pub fn zoom_out(state: &AppState) -> Result<u32, String> {
    Ok(state.session()?.zoom_out())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::upload_files;
    use crate::models::IncomingFile;

    #[test]
    fn test_preview_follows_zoom() {
        let state = AppState::default();
        assert!(get_preview(&state).unwrap().is_none());

        upload_files(
            vec![IncomingFile::new("a.txt", "text/plain", b"alpha".to_vec())],
            &state,
        )
        .unwrap();
        assert_eq!(zoom_in(&state), Ok(110));
        assert_eq!(zoom_out(&state), Ok(100));
        assert_eq!(zoom_out(&state), Ok(90));
        assert_eq!(get_preview(&state).unwrap().unwrap().zoom_percent, 90);
    }
}
