//! Application state management
//!
//! The frontend-facing commands share one session behind a mutex.

use std::sync::{Mutex, MutexGuard};

use crate::config::Config;
use crate::session::Session;

/// Main application state
pub struct AppState {
    pub session: Mutex<Session>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            session: Mutex::new(Session::new(config)),
        }
    }

    /// Lock the session for one command
    pub fn session(&self) -> Result<MutexGuard<'_, Session>, String> {
        self.session.lock().map_err(|e| e.to_string())
    }
}
