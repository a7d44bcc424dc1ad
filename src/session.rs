//! Session state
//!
//! Central state for one previewing session:
//! - Uploaded files with their extracted content and preview handles
//! - The active file and its preview mode
//! - The current search query and outcome
//! - Zoom level and pending notices
//!
//! Nothing here outlives the process.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{ExtractError, SessionError};
use crate::extractors::extract;
use crate::format::{extension, DocumentFormat};
use crate::handle::{PreviewHandle, PreviewRegistry};
use crate::intake::{self, Rejection};
use crate::models::{
    ExtractionResult, FileHit, FileSummary, IncomingFile, Notice, NoticeLevel, SearchOutcome,
};
use crate::preview::{build_body, FileInfo, PreviewBody, PreviewMode, PreviewView, Zoom};
use crate::search::{search, search_files, SearchableFile};

/// An accepted file and everything derived from it
#[derive(Debug)]
pub struct UploadedFile {
    pub id: u64,
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub format: DocumentFormat,
    pub added_at: DateTime<Utc>,
    /// Failed extractions keep the user-facing message
    pub content: Result<ExtractionResult, String>,
    handle: PreviewHandle,
}

impl UploadedFile {
    pub fn preview_url(&self) -> &str {
        self.handle.url()
    }

    pub fn info(&self) -> FileInfo {
        FileInfo {
            name: self.name.clone(),
            size: self.size,
            kind: extension(&self.name).unwrap_or_default(),
        }
    }
}

/// Outcome of one drop
#[derive(Debug, Serialize, Clone, Default)]
pub struct DropReport {
    /// Indices of the appended files, extraction failures included
    pub accepted: Vec<usize>,
    pub rejected: Vec<Rejection>,
}

pub struct Session {
    config: Config,
    registry: PreviewRegistry,
    files: Vec<UploadedFile>,
    active: Option<usize>,
    mode: PreviewMode,
    query: String,
    outcome: SearchOutcome,
    zoom: Zoom,
    notices: Vec<Notice>,
    next_id: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Session {
    pub fn new(config: Config) -> Self {
        let zoom = Zoom::new(config.zoom);
        Self {
            config,
            registry: PreviewRegistry::new(),
            files: Vec::new(),
            active: None,
            mode: PreviewMode::None,
            query: String::new(),
            outcome: SearchOutcome::Cleared,
            zoom,
            notices: Vec::new(),
            next_id: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &PreviewRegistry {
        &self.registry
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_file(&self) -> Option<&UploadedFile> {
        self.active.and_then(|i| self.files.get(i))
    }

    pub fn mode(&self) -> PreviewMode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    pub fn zoom(&self) -> &Zoom {
        &self.zoom
    }

    /// Accept a batch of dropped files
    ///
    /// Each file is vetted first; rejected ones never reach extraction.
    /// Accepted files are extracted in parallel and appended in drop order,
    /// even when their extraction fails (their preview is then unavailable).
    pub fn add_files(&mut self, incoming: Vec<IncomingFile>) -> DropReport {
        let mut report = DropReport::default();
        let mut accepted: Vec<(IncomingFile, DocumentFormat)> = Vec::new();

        for file in incoming {
            match intake::check(&file, &self.config) {
                Ok(format) => accepted.push((file, format)),
                Err(err) => {
                    log::info!("Rejected {}: {}", file.name, err);
                    self.notify(NoticeLevel::Error, err.to_string());
                    report.rejected.push(Rejection::new(&file, &err));
                }
            }
        }

        let results: Vec<Result<ExtractionResult, ExtractError>> = accepted
            .par_iter()
            .map(|(file, format)| extract(*format, &file.bytes))
            .collect();

        let was_empty = self.files.is_empty();
        for ((file, format), result) in accepted.into_iter().zip(results) {
            let content = match result {
                Ok(content) => {
                    log::info!("Extracted {} as {:?}", file.name, format);
                    self.notify(
                        NoticeLevel::Success,
                        format!("{} Uploaded Successfully", format.label()),
                    );
                    Ok(content)
                }
                Err(err) => {
                    log::warn!("Extraction failed for {}: {}", file.name, err);
                    self.notify(NoticeLevel::Error, ExtractError::USER_MESSAGE);
                    Err(ExtractError::USER_MESSAGE.to_string())
                }
            };

            self.next_id += 1;
            let size = file.size();
            let bytes: Arc<[u8]> = Arc::from(file.bytes);
            let handle = self.registry.acquire(&file.name, bytes);

            self.files.push(UploadedFile {
                id: self.next_id,
                name: file.name,
                size,
                mime: file.mime,
                format,
                added_at: Utc::now(),
                content,
                handle,
            });
            report.accepted.push(self.files.len() - 1);
        }

        if was_empty && !self.files.is_empty() {
            self.activate(0);
        }
        report
    }

    /// Make a file the active one and switch to its preview mode
    pub fn select(&mut self, index: usize) -> Result<PreviewMode, SessionError> {
        self.check_index(index)?;
        self.activate(index);
        Ok(self.mode)
    }

    /// Remove one file, releasing its preview handle
    pub fn remove(&mut self, index: usize) -> Result<(), SessionError> {
        self.check_index(index)?;
        let removed = self.files.remove(index);
        log::info!("Removed {}", removed.name);
        drop(removed);

        let active = self.active;
        match active {
            _ if self.files.is_empty() => self.deactivate(),
            Some(active) if active > index => self.active = Some(active - 1),
            Some(active) if active == index => {
                self.activate(index.min(self.files.len() - 1));
            }
            _ => {}
        }
        Ok(())
    }

    /// Remove every file, releasing all preview handles
    pub fn remove_all(&mut self) {
        log::info!("Removing all {} files", self.files.len());
        self.files.clear();
        self.deactivate();
    }

    /// Search the active file
    pub fn set_query(&mut self, query: &str) -> SearchOutcome {
        self.query = query.to_string();
        self.refresh_outcome();
        if let Some(message) = self.outcome.message() {
            self.notify(NoticeLevel::Info, message);
        }
        self.outcome.clone()
    }

    /// Search every file that has extracted content
    pub fn search_all(&self, query: &str) -> Vec<FileHit> {
        let searchable: Vec<SearchableFile<'_>> = self
            .files
            .iter()
            .enumerate()
            .filter_map(|(index, file)| {
                file.content.as_ref().ok().map(|content| SearchableFile {
                    index,
                    name: &file.name,
                    format: file.format,
                    content,
                })
            })
            .collect();
        search_files(query, &searchable, &self.config)
    }

    /// The preview of the active file under the current search
    pub fn view(&self) -> Option<PreviewView> {
        let file = self.active_file()?;
        let body = match &file.content {
            Ok(content) => build_body(content, &self.outcome, self.config.table_preview_rows),
            Err(reason) => PreviewBody::Unavailable {
                reason: reason.clone(),
            },
        };

        Some(PreviewView {
            mode: self.mode,
            file: file.info(),
            url: file.preview_url().to_string(),
            zoom_percent: self.zoom.percent(),
            body,
            message: self.outcome.message(),
        })
    }

    pub fn zoom_in(&mut self) -> u32 {
        self.zoom.zoom_in()
    }

    pub fn zoom_out(&mut self) -> u32 {
        self.zoom.zoom_out()
    }

    pub fn summaries(&self) -> Vec<FileSummary> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, f)| FileSummary {
                id: f.id,
                name: f.name.clone(),
                size: f.size,
                mime: f.mime.clone(),
                format: f.format,
                added_at: f.added_at,
                preview_url: f.preview_url().to_string(),
                extracted: f.content.is_ok(),
                active: self.active == Some(i),
            })
            .collect()
    }

    /// Drain pending notifications
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice::new(level, message));
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index < self.files.len() {
            Ok(())
        } else {
            Err(SessionError::IndexOutOfRange {
                index,
                len: self.files.len(),
            })
        }
    }

    fn activate(&mut self, index: usize) {
        self.active = Some(index);
        self.mode = PreviewMode::for_format(self.files[index].format);
        self.refresh_outcome();
    }

    fn deactivate(&mut self) {
        self.active = None;
        self.mode = PreviewMode::None;
        self.refresh_outcome();
    }

    fn refresh_outcome(&mut self) {
        self.outcome = match self.active_file().map(|f| &f.content) {
            Some(Ok(content)) => search(&self.query, content),
            _ if self.query.is_empty() => SearchOutcome::Cleared,
            _ => SearchOutcome::no_match(&self.query),
        };
    }
}
