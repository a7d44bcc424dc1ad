//! Runtime configuration
//!
//! Read from a TOML file once at startup. Every key is optional; anything
//! missing falls back to the defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// 10 MB per-file ceiling
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// MIME types accepted at the drop surface
pub const DEFAULT_ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document", // .docx
    "application/msword", // .doc
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet", // .xlsx
    "application/vnd.ms-excel", // .xls
    "application/vnd.openxmlformats-officedocument.presentationml.presentation", // .pptx
    "application/vnd.ms-powerpoint", // .ppt
    "text/plain", // .txt
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_file_size: u64,
    pub allowed_mime_types: Vec<String>,
    /// Body rows shown for a table when no query is active
    pub table_preview_rows: usize,
    /// Characters of context kept around each cross-file hit
    pub context_chars: usize,
    pub max_hits_per_file: usize,
    pub zoom: ZoomConfig,
}

/// Zoom bounds in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub initial: u32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 50,
            max: 200,
            step: 10,
            initial: 100,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_mime_types: DEFAULT_ALLOWED_MIME_TYPES
                .iter()
                .map(|m| m.to_string())
                .collect(),
            table_preview_rows: 10,
            context_chars: 50,
            max_hits_per_file: 5,
            zoom: ZoomConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the per-user config file is
    /// used when present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => {
                    log::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_size == 0 {
            return Err(ConfigError::Invalid("max_file_size must be positive".into()));
        }
        if self.allowed_mime_types.is_empty() {
            return Err(ConfigError::Invalid("allowed_mime_types is empty".into()));
        }
        let zoom = &self.zoom;
        if zoom.step == 0 {
            return Err(ConfigError::Invalid("zoom.step must be positive".into()));
        }
        if zoom.min > zoom.max {
            return Err(ConfigError::Invalid(format!(
                "zoom.min ({}) exceeds zoom.max ({})",
                zoom.min, zoom.max
            )));
        }
        if zoom.initial < zoom.min || zoom.initial > zoom.max {
            return Err(ConfigError::Invalid(format!(
                "zoom.initial ({}) is outside {}..={}",
                zoom.initial, zoom.min, zoom.max
            )));
        }
        Ok(())
    }

    /// MIME types compare trimmed and case-insensitively, as in `classify`
    pub fn is_allowed_mime(&self, mime: &str) -> bool {
        let mime = mime.trim();
        self.allowed_mime_types
            .iter()
            .any(|m| m.eq_ignore_ascii_case(mime))
    }
}

/// `<config_dir>/docpreview/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("docpreview").join("config.toml"))
}
