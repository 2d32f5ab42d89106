//! The session engine.
//!
//! Owns the single active-session slot and drives the lifecycle:
//! start, add breaks, stop. Exactly one session can be active at a time,
//! enforced by the slot being an `Option`. All timing uses wall-clock time;
//! sessions run for minutes or hours, so clock adjustments are acceptable.

use chrono::Utc;

use crate::error::StrideError;

use super::journey::JourneyTarget;
use super::log::SessionLog;
use super::session::{LiveStats, SessionRecord, SessionSummary};

/// Tracks the active session and finalizes completed ones into the log.
pub struct Tracker {
    log: SessionLog,
    target: JourneyTarget,
    current: Option<SessionRecord>,
}

impl Tracker {
    /// Create a tracker over the given log with the default journey target.
    #[must_use]
    pub fn new(log: SessionLog) -> Self {
        Self::with_target(log, JourneyTarget::default_const())
    }

    /// Create a tracker with a custom journey target.
    #[must_use]
    pub fn with_target(log: SessionLog, target: JourneyTarget) -> Self {
        Self {
            log,
            target,
            current: None,
        }
    }

    /// Start a new session.
    ///
    /// Returns the new session's ID.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyActive` if a session is already running; the running
    /// session is left untouched.
    pub fn start(&mut self) -> Result<String, StrideError> {
        if self.current.is_some() {
            return Err(StrideError::AlreadyActive);
        }

        let session = SessionRecord::new(Utc::now());
        let id = session.session_id.clone();
        self.current = Some(session);
        Ok(id)
    }

    /// Add a break to the active session.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveSession` if nothing is running, or `InvalidBreak`
    /// for negative or zero-length input. Nothing is recorded on failure.
    pub fn add_break(&mut self, minutes: i64, seconds: i64) -> Result<(), StrideError> {
        if minutes < 0 || seconds < 0 {
            return Err(StrideError::InvalidBreak(
                "break minutes and seconds must not be negative".to_string(),
            ));
        }
        if minutes == 0 && seconds == 0 {
            return Err(StrideError::InvalidBreak(
                "break must be longer than zero seconds".to_string(),
            ));
        }

        let session = self
            .current
            .as_mut()
            .ok_or(StrideError::NoActiveSession)?;
        session.record_break(minutes, seconds, Utc::now());
        Ok(())
    }

    /// Stop the active session.
    ///
    /// Finalizes the record, appends it to the log, clears the slot, and
    /// returns the session's final statistics. The slot is cleared only
    /// after the append succeeds.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveSession` if nothing is running, or a storage error
    /// if the log cannot be written (the session stays active in that case).
    pub fn stop(&mut self) -> Result<SessionSummary, StrideError> {
        let active = self
            .current
            .as_ref()
            .ok_or(StrideError::NoActiveSession)?;

        // Finalize a copy so a failed append leaves the slot untouched.
        let mut finalized = active.clone();
        let total_duration = finalized.finalize_at(Utc::now(), self.target.speed_mph);
        let summary = finalized.summary(total_duration);

        self.log.append(&finalized)?;
        self.current = None;

        Ok(summary)
    }

    /// Get real-time statistics for the active session.
    ///
    /// Absence is reported as data (`None`), not as an error: queries treat
    /// "no session" as a normal answer while mutations treat it as failure.
    #[must_use]
    pub fn stats(&self) -> Option<LiveStats> {
        self.current
            .as_ref()
            .map(|session| session.stats_at(Utc::now(), self.target.speed_mph))
    }

    /// Borrow the active session, if any.
    #[must_use]
    pub const fn active(&self) -> Option<&SessionRecord> {
        self.current.as_ref()
    }

    /// Restore a previously persisted active session into the slot.
    ///
    /// Used by shells that keep the slot alive across process invocations.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyActive` if the slot is occupied.
    pub fn restore(&mut self, session: SessionRecord) -> Result<(), StrideError> {
        if self.current.is_some() {
            return Err(StrideError::AlreadyActive);
        }
        self.current = Some(session);
        Ok(())
    }

    /// The journey target this tracker measures against.
    #[must_use]
    pub const fn target(&self) -> &JourneyTarget {
        &self.target
    }

    /// The underlying session log.
    #[must_use]
    pub const fn log(&self) -> &SessionLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_tracker(temp_dir: &TempDir) -> Tracker {
        Tracker::new(SessionLog::with_dir(temp_dir.path().to_path_buf()))
    }

    #[test]
    fn test_start_sets_the_slot() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = test_tracker(&temp_dir);

        let id = tracker.start().unwrap();
        let active = tracker.active().unwrap();

        assert_eq!(active.session_id, id);
        assert!(active.breaks.is_empty());
        assert!(!active.is_finished());
    }

    #[test]
    fn test_double_start_fails_and_keeps_first_session() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = test_tracker(&temp_dir);

        let first_id = tracker.start().unwrap();
        tracker.add_break(1, 0).unwrap();

        let err = tracker.start().unwrap_err();
        assert!(matches!(err, StrideError::AlreadyActive));

        let active = tracker.active().unwrap();
        assert_eq!(active.session_id, first_id);
        assert_eq!(active.total_break_time, 60);
    }

    #[test]
    fn test_add_break_without_session_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = test_tracker(&temp_dir);

        let err = tracker.add_break(1, 0).unwrap_err();
        assert!(matches!(err, StrideError::NoActiveSession));
    }

    #[test]
    fn test_stop_without_session_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = test_tracker(&temp_dir);

        let err = tracker.stop().unwrap_err();
        assert!(matches!(err, StrideError::NoActiveSession));
    }

    #[test]
    fn test_negative_break_rejected_without_state_change() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = test_tracker(&temp_dir);
        tracker.start().unwrap();

        assert!(matches!(
            tracker.add_break(-1, 30),
            Err(StrideError::InvalidBreak(_))
        ));
        assert!(matches!(
            tracker.add_break(1, -30),
            Err(StrideError::InvalidBreak(_))
        ));
        assert!(matches!(
            tracker.add_break(0, 0),
            Err(StrideError::InvalidBreak(_))
        ));

        let active = tracker.active().unwrap();
        assert!(active.breaks.is_empty());
        assert_eq!(active.total_break_time, 0);
    }

    #[test]
    fn test_break_total_is_sum_of_adds() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = test_tracker(&temp_dir);
        tracker.start().unwrap();

        tracker.add_break(2, 30).unwrap();
        tracker.add_break(0, 15).unwrap();
        tracker.add_break(1, 0).unwrap();

        let active = tracker.active().unwrap();
        assert_eq!(active.total_break_time, 150 + 15 + 60);
        assert_eq!(active.breaks.len(), 3);
    }

    #[test]
    fn test_stop_persists_and_clears_slot() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = test_tracker(&temp_dir);

        let id = tracker.start().unwrap();
        tracker.add_break(0, 10).unwrap();
        let summary = tracker.stop().unwrap();

        assert_eq!(summary.session_id, id);
        assert_eq!(summary.break_time, 10);
        assert_eq!(summary.breaks_count, 1);
        assert!(tracker.active().is_none());

        let loaded = tracker.log().load_all().unwrap();
        assert_eq!(loaded.sessions.len(), 1);
        assert_eq!(loaded.sessions[0].session_id, id);
        assert_eq!(
            loaded.sessions[0].running_time,
            summary.running_time
        );
        assert!((loaded.sessions[0].distance_miles - summary.distance_miles).abs() < 1e-9);
    }

    #[test]
    fn test_stats_reports_absence_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = test_tracker(&temp_dir);

        assert!(tracker.stats().is_none());

        tracker.start().unwrap();
        let stats = tracker.stats().unwrap();
        assert_eq!(stats.break_time, 0);
        assert_eq!(stats.breaks_count, 0);
        assert!(stats.session_time >= 0);
    }

    #[test]
    fn test_restore_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = test_tracker(&temp_dir);

        tracker.start().unwrap();
        let saved = tracker.active().unwrap().clone();

        let mut fresh = test_tracker(&temp_dir);
        fresh.restore(saved.clone()).unwrap();
        assert_eq!(fresh.active(), Some(&saved));

        assert!(matches!(
            fresh.restore(saved),
            Err(StrideError::AlreadyActive)
        ));
    }

    #[test]
    fn test_restart_after_stop() {
        let temp_dir = TempDir::new().unwrap();
        let mut tracker = test_tracker(&temp_dir);

        tracker.start().unwrap();
        tracker.stop().unwrap();
        tracker.start().unwrap();
        tracker.stop().unwrap();

        let loaded = tracker.log().load_all().unwrap();
        assert_eq!(loaded.sessions.len(), 2);
    }
}
