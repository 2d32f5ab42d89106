//! Path resolution for stride configuration and data files.
//!
//! All stride data is stored in `~/.stride/`:
//! - `config.yaml` - Main configuration file
//! - `sessions.json` - Completed session log
//! - `active.json` - Active session slot (present only while running)
//! - `break.json` - Live break marker (present only during a timed break)

use std::path::PathBuf;

use crate::error::StrideError;

/// Paths to stride configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.stride/`
    pub root: PathBuf,
    /// Config file: `~/.stride/config.yaml`
    pub config_file: PathBuf,
    /// Session log: `~/.stride/sessions.json`
    pub sessions_file: PathBuf,
    /// Active session slot: `~/.stride/active.json`
    pub active_file: PathBuf,
    /// Live break marker: `~/.stride/break.json`
    pub break_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, StrideError> {
        let home = std::env::var("HOME")
            .map_err(|_| StrideError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".stride")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            sessions_file: root.join("sessions.json"),
            active_file: root.join("active.json"),
            break_file: root.join("break.json"),
            root,
        }
    }

    /// Ensure the data directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), StrideError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                StrideError::Config(format!(
                    "Failed to create directory {:?}: {}",
                    self.root, e
                ))
            })?;
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".stride"))
        })
    }
}
