//! Drop surface checks
//!
//! Files are vetted here before any extraction work: the MIME allow-list,
//! the size ceiling, then format classification.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::IntakeError;
use crate::format::{classify, DocumentFormat};
use crate::models::IncomingFile;

/// A file turned away at intake
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub name: String,
    pub mime: String,
    pub reason: String,
}

impl Rejection {
    pub fn new(file: &IncomingFile, err: &IntakeError) -> Self {
        Self {
            name: file.name.clone(),
            mime: file.mime.clone(),
            reason: err.to_string(),
        }
    }
}

/// Vet a dropped file and return the format it will be extracted as
pub fn check(file: &IncomingFile, config: &Config) -> Result<DocumentFormat, IntakeError> {
    if !config.is_allowed_mime(&file.mime) {
        return Err(IntakeError::UnsupportedType {
            mime: file.mime.clone(),
        });
    }

    let size = file.size();
    if size > config.max_file_size {
        return Err(IntakeError::SizeExceeded {
            size,
            limit: config.max_file_size,
        });
    }

    match classify(&file.mime, &file.name) {
        DocumentFormat::Unsupported => Err(IntakeError::UnsupportedType {
            mime: file.mime.clone(),
        }),
        format => Ok(format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    fn file(name: &str, mime: &str, size: usize) -> IncomingFile {
        IncomingFile::new(name, mime, vec![b'a'; size])
    }

    #[test]
    fn test_accepts_supported_types_within_limit() {
        let config = Config::default();
        assert_eq!(
            check(&file("notes.txt", "text/plain", 11), &config),
            Ok(DocumentFormat::Text)
        );
        assert_eq!(
            check(&file("a.docx", DOCX_MIME, 10), &config),
            Ok(DocumentFormat::Docx)
        );
        assert_eq!(
            check(&file("a.pdf", "application/pdf", 10), &config),
            Ok(DocumentFormat::Pdf)
        );
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let config = Config::default();
        let at_limit = file("big.txt", "text/plain", config.max_file_size as usize);
        assert!(check(&at_limit, &config).is_ok());

        let over = file("big.txt", "text/plain", config.max_file_size as usize + 1);
        assert!(matches!(
            check(&over, &config),
            Err(IntakeError::SizeExceeded { .. })
        ));
    }

    #[test]
    fn test_twelve_megabyte_file_rejected_with_size_reason() {
        let config = Config::default();
        let big = file("big.docx", DOCX_MIME, 12 * 1024 * 1024);
        let err = check(&big, &config).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds the 10 MB limit.");
        assert_eq!(Rejection::new(&big, &err).reason, "File size exceeds the 10 MB limit.");
    }

    #[test]
    fn test_unlisted_mime_rejected_before_size() {
        let config = Config::default();
        let err = check(&file("pic.png", "image/png", 12 * 1024 * 1024), &config).unwrap_err();
        assert_eq!(
            err,
            IntakeError::UnsupportedType {
                mime: "image/png".to_string()
            }
        );
    }

    #[test]
    fn test_allow_listed_legacy_formats_have_no_extractor() {
        let config = Config::default();
        let err = check(&file("old.doc", "application/msword", 10), &config).unwrap_err();
        assert_eq!(err.to_string(), "application/msword is not a supported file type.");
    }
}
