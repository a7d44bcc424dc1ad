//! Error types
//!
//! One enum per boundary: intake, extraction, session state and
//! configuration. The command layer turns all of them into strings.

use thiserror::Error;

/// Reasons a dropped file is turned away before extraction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("{mime} is not a supported file type.")]
    UnsupportedType { mime: String },

    #[error("File size exceeds the {} MB limit.", limit / (1024 * 1024))]
    SizeExceeded { size: u64, limit: u64 },
}

/// Failures raised while turning raw bytes into viewable content
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("malformed XML in {part}: {message}")]
    Xml { part: String, message: String },

    #[error("missing part: {0}")]
    MissingPart(String),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("no content could be extracted")]
    Empty,

    #[error("no extractor for {0}")]
    Unsupported(String),
}

impl ExtractError {
    /// The only message a user ever sees for an extraction failure
    pub const USER_MESSAGE: &'static str = "An error occurred during file processing.";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("file index {index} is out of range ({len} files)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no file is selected")]
    NoActiveFile,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intake_messages_name_the_constraint() {
        let err = IntakeError::UnsupportedType {
            mime: "image/png".to_string(),
        };
        assert_eq!(err.to_string(), "image/png is not a supported file type.");

        let err = IntakeError::SizeExceeded {
            size: 12 * 1024 * 1024,
            limit: 10 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "File size exceeds the 10 MB limit.");
    }
}
