use crate::error::ExtractError;

/// Extract content from plain text files
///
/// Decodes as UTF-8 the way a browser's `File.text()` does: a leading BOM is
/// dropped and invalid sequences become U+FFFD. Valid UTF-8 comes back
/// unchanged.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if had_errors {
        log::warn!("Text file contained invalid UTF-8; replaced undecodable bytes");
    }
    Ok(text.into_owned())
}
