//! Ephemeral preview handles
//!
//! Every uploaded file gets a `preview://<id>/<name>` URL that resolves to its
//! bytes for direct display or download. The URL lives exactly as long as its
//! `PreviewHandle`: dropping the handle (file removed, list cleared, session
//! torn down) releases the registry entry.

use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, Weak};

const SCHEME: &str = "preview://";

#[derive(Debug, Default)]
struct Entries {
    next_id: u64,
    blobs: FxHashMap<u64, Arc<[u8]>>,
}

/// Hands out preview handles and resolves their URLs
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    entries: Arc<Mutex<Entries>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes under a fresh URL
    pub fn acquire(&self, name: &str, bytes: Arc<[u8]>) -> PreviewHandle {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.next_id += 1;
        let id = entries.next_id;
        entries.blobs.insert(id, bytes);

        PreviewHandle {
            id,
            url: format!("{}{}/{}", SCHEME, id, name),
            entries: Arc::downgrade(&self.entries),
        }
    }

    /// Bytes behind a live URL; `None` once its handle is dropped
    pub fn resolve(&self, url: &str) -> Option<Arc<[u8]>> {
        let id = parse_id(url)?;
        let entries = self.entries.lock().ok()?;
        entries.blobs.get(&id).cloned()
    }

    /// Number of handles still alive
    pub fn live_count(&self) -> usize {
        self.entries.lock().map(|e| e.blobs.len()).unwrap_or(0)
    }
}

fn parse_id(url: &str) -> Option<u64> {
    let rest = url.strip_prefix(SCHEME)?;
    let id = rest.split('/').next()?;
    id.parse().ok()
}

/// Scoped ownership of one preview URL
#[derive(Debug)]
pub struct PreviewHandle {
    id: u64,
    url: String,
    entries: Weak<Mutex<Entries>>,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if let Some(entries) = self.entries.upgrade() {
            let mut entries = entries
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            entries.blobs.remove(&self.id);
            log::debug!("Released preview handle {}", self.url);
        }
    }
}
