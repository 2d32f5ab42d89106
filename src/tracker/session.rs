//! Session records and per-session arithmetic.
//!
//! A session is one continuous tracked run from start to stop. Breaks are
//! subtracted from wall time to produce the net running time, which converts
//! to distance at the journey's fixed speed.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A user-declared pause within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEntry {
    /// Whole minutes of the break.
    pub minutes: i64,
    /// Leftover seconds of the break.
    pub seconds: i64,
    /// Total break length in seconds (`minutes * 60 + seconds`).
    pub total_seconds: i64,
    /// When the break was recorded.
    pub timestamp: DateTime<Utc>,
}

/// A single running session.
///
/// Created in memory at start, mutated only by break additions while active,
/// finalized and persisted at stop, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique ID derived from the start instant.
    pub session_id: String,
    /// When the session started.
    pub start_time: DateTime<Utc>,
    /// When the session ended (None while still running).
    pub end_time: Option<DateTime<Utc>>,
    /// Breaks taken during the session, in the order they were added.
    pub breaks: Vec<BreakEntry>,
    /// Total break time in seconds.
    pub total_break_time: i64,
    /// Net running time in seconds (wall time minus breaks), set at stop.
    pub running_time: i64,
    /// Distance covered in miles, derived from running time at stop.
    pub distance_miles: f64,
    /// Estimated calories burned (~100 per mile), derived at stop.
    pub calories: i64,
}

impl SessionRecord {
    /// Create a new active session starting at the given instant.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            session_id: start.to_rfc3339(),
            start_time: start,
            end_time: None,
            breaks: Vec::new(),
            total_break_time: 0,
            running_time: 0,
            distance_miles: 0.0,
            calories: 0,
        }
    }

    /// Append a break entry and bump the break total.
    ///
    /// Input validation happens in the engine; the record itself only
    /// accumulates.
    pub fn record_break(&mut self, minutes: i64, seconds: i64, at: DateTime<Utc>) {
        let total_seconds = minutes * 60 + seconds;
        self.breaks.push(BreakEntry {
            minutes,
            seconds,
            total_seconds,
            timestamp: at,
        });
        self.total_break_time += total_seconds;
    }

    /// Finalize the session at the given end instant.
    ///
    /// Computes running time (clamped at zero if declared breaks exceed the
    /// wall duration), distance, and calories. Returns the wall duration in
    /// seconds.
    pub fn finalize_at(&mut self, end: DateTime<Utc>, speed_mph: f64) -> i64 {
        self.end_time = Some(end);
        let total_duration = end.signed_duration_since(self.start_time).num_seconds();
        self.running_time = (total_duration - self.total_break_time).max(0);
        self.distance_miles = distance_for(self.running_time, speed_mph);
        self.calories = calories_for(self.distance_miles);
        total_duration
    }

    /// Check whether the session has been stopped.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }

    /// Snapshot live statistics against the given instant, without mutating.
    #[must_use]
    pub fn stats_at(&self, now: DateTime<Utc>, speed_mph: f64) -> LiveStats {
        let session_time = now.signed_duration_since(self.start_time).num_seconds();
        let running_time = (session_time - self.total_break_time).max(0);
        let distance_miles = distance_for(running_time, speed_mph);

        LiveStats {
            session_time,
            running_time,
            break_time: self.total_break_time,
            distance_miles,
            calories: calories_for(distance_miles),
            breaks_count: self.breaks.len(),
        }
    }

    /// Build the summary returned by a stop operation.
    #[must_use]
    pub fn summary(&self, total_duration: i64) -> SessionSummary {
        SessionSummary {
            session_id: self.session_id.clone(),
            total_duration,
            running_time: self.running_time,
            break_time: self.total_break_time,
            distance_miles: self.distance_miles,
            calories: self.calories,
            breaks_count: self.breaks.len(),
        }
    }

    /// Get the start time in the local timezone.
    #[must_use]
    pub fn started_at_local(&self) -> DateTime<Local> {
        self.start_time.with_timezone(&Local)
    }
}

/// Final statistics returned when a session is stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// ID of the stopped session.
    pub session_id: String,
    /// Wall-clock duration of the session in seconds.
    pub total_duration: i64,
    /// Net running time in seconds.
    pub running_time: i64,
    /// Total break time in seconds.
    pub break_time: i64,
    /// Distance covered in miles.
    pub distance_miles: f64,
    /// Estimated calories burned.
    pub calories: i64,
    /// Number of breaks taken.
    pub breaks_count: usize,
}

/// Real-time statistics for the active session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveStats {
    /// Wall-clock seconds since the session started.
    pub session_time: i64,
    /// Net running seconds so far.
    pub running_time: i64,
    /// Total break seconds so far.
    pub break_time: i64,
    /// Distance covered so far in miles.
    pub distance_miles: f64,
    /// Estimated calories burned so far.
    pub calories: i64,
    /// Number of breaks taken so far.
    pub breaks_count: usize,
}

/// Convert net running seconds to miles at the given speed.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn distance_for(running_seconds: i64, speed_mph: f64) -> f64 {
    (running_seconds as f64 / 3600.0) * speed_mph
}

/// Estimate calories from distance (~100 per mile, floored).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn calories_for(distance_miles: f64) -> i64 {
    (distance_miles * 100.0).floor() as i64
}
