//! Flat-file session log.
//!
//! Completed sessions live in a single `sessions.json` array, human-readable
//! and append-only: every stop reads the whole file, appends the new record,
//! and rewrites it. The active session (if any) is persisted separately in
//! `active.json` so the CLI can pick it up across invocations.

use std::path::PathBuf;

use crate::error::StrideError;

use super::session::SessionRecord;

/// Result of loading the session log.
///
/// Distinguishes a genuinely empty log from one that existed but could not
/// be parsed. The default policy is to recover with an empty list; shells
/// may warn the user when `recovered` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedLog {
    /// All persisted sessions, in append order.
    pub sessions: Vec<SessionRecord>,
    /// True if the log file existed but was unparseable.
    pub recovered: bool,
}

/// Persistent store for session records.
pub struct SessionLog {
    /// Path to the sessions file.
    sessions_file: PathBuf,
    /// Path to the active-session slot file.
    active_file: PathBuf,
}

impl SessionLog {
    /// Create a log backed by the given files.
    #[must_use]
    pub fn new(sessions_file: PathBuf, active_file: PathBuf) -> Self {
        Self {
            sessions_file,
            active_file,
        }
    }

    /// Create a log rooted in a directory (for testing).
    #[must_use]
    pub fn with_dir(dir: PathBuf) -> Self {
        Self::new(dir.join("sessions.json"), dir.join("active.json"))
    }

    /// Load all persisted sessions in append order.
    ///
    /// A missing file yields an empty log. A file that exists but cannot be
    /// parsed also yields an empty log, with `recovered` set so the caller
    /// can surface a warning instead of losing the distinction.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load_all(&self) -> Result<LoadedLog, StrideError> {
        if !self.sessions_file.exists() {
            return Ok(LoadedLog {
                sessions: Vec::new(),
                recovered: false,
            });
        }

        let content = std::fs::read_to_string(&self.sessions_file)?;
        match serde_json::from_str::<Vec<SessionRecord>>(&content) {
            Ok(sessions) => Ok(LoadedLog {
                sessions,
                recovered: false,
            }),
            Err(_) => Ok(LoadedLog {
                sessions: Vec::new(),
                recovered: true,
            }),
        }
    }

    /// Append a finalized session to the log.
    ///
    /// Reads the full file, appends in memory, and rewrites. Records already
    /// in the log are never modified.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read or written.
    pub fn append(&self, session: &SessionRecord) -> Result<(), StrideError> {
        let mut loaded = self.load_all()?;
        loaded.sessions.push(session.clone());

        let content = serde_json::to_string_pretty(&loaded.sessions)?;
        std::fs::write(&self.sessions_file, content)?;
        Ok(())
    }

    /// Persist the active session slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot file cannot be written.
    pub fn save_active(&self, session: &SessionRecord) -> Result<(), StrideError> {
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.active_file, content)?;
        Ok(())
    }

    /// Load the persisted active session, if one exists.
    ///
    /// An unparseable slot file is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot file exists but cannot be read.
    pub fn load_active(&self) -> Result<Option<SessionRecord>, StrideError> {
        if !self.active_file.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.active_file)?;
        Ok(serde_json::from_str(&content).ok())
    }

    /// Remove the active session slot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear_active(&self) -> Result<(), StrideError> {
        if self.active_file.exists() {
            std::fs::remove_file(&self.active_file)?;
        }
        Ok(())
    }
}
