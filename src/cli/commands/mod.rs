//! Command implementations for stride.
//!
//! Each command is a thin shell: it opens the tracker, calls one core
//! operation, and renders the result in the requested format.

mod completions;
mod progress;
mod session;

pub use completions::completions;
pub use progress::{export, history, month, progress};
pub use session::{break_add, break_end, break_start, start, status, stop};

use crate::config::Paths;
use crate::error::StrideError;
use crate::tracker::{SessionLog, Tracker};

/// Open the tracker for this data directory, restoring any persisted
/// active session into the slot.
pub(crate) fn open_tracker(paths: &Paths) -> Result<Tracker, StrideError> {
    paths.ensure_dirs()?;

    let log = SessionLog::new(paths.sessions_file.clone(), paths.active_file.clone());
    let mut tracker = Tracker::new(log);

    let saved = tracker.log().load_active()?;
    if let Some(active) = saved {
        // A slot whose session is already in the log is stale: a prior stop
        // appended the record but failed to remove the slot file. Discard it
        // instead of double-counting the session.
        let logged = tracker.log().load_all()?;
        if logged
            .sessions
            .iter()
            .any(|s| s.session_id == active.session_id)
        {
            tracker.log().clear_active()?;
        } else {
            tracker.restore(active)?;
        }
    }

    Ok(tracker)
}

/// Write the tracker's slot state back to disk so the next invocation
/// sees it.
pub(crate) fn persist_active(tracker: &Tracker) -> Result<(), StrideError> {
    match tracker.active() {
        Some(session) => tracker.log().save_active(session),
        None => tracker.log().clear_active(),
    }
}
