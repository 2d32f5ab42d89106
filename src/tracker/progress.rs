//! Progress aggregation over the session log.
//!
//! Stateless rollups: overall progress toward the journey target and
//! per-month breakdowns. Everything is recomputed from the full log on each
//! query, so results always reflect the current file contents.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::journey::JourneyTarget;
use super::session::SessionRecord;

/// Overall progress toward the journey target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Number of completed sessions.
    pub total_sessions: usize,
    /// Sum of net running time across all sessions, in seconds.
    pub total_running_time: i64,
    /// Sum of distance across all sessions, in miles.
    pub total_distance: f64,
    /// Target duration in seconds.
    pub target_time: i64,
    /// Target distance in miles.
    pub target_distance: f64,
    /// Running time as a percentage of the target.
    pub time_progress_percent: f64,
    /// Distance as a percentage of the target.
    pub distance_progress_percent: f64,
    /// Estimated sessions left, based on the average session so far.
    /// Zero when no time has been logged (no estimate, not a real answer).
    pub estimated_sessions_remaining: f64,
    /// Seconds left to the target; negative once the target is exceeded.
    pub time_remaining: i64,
    /// Miles left to the target; negative once the target is exceeded.
    pub distance_remaining: f64,
}

impl Progress {
    /// Compute overall progress from the persisted sessions.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(sessions: &[SessionRecord], target: &JourneyTarget) -> Self {
        let total_sessions = sessions.len();
        let total_running_time: i64 = sessions.iter().map(|s| s.running_time).sum();
        let total_distance: f64 = sessions.iter().map(|s| s.distance_miles).sum();

        let target_time = target.target_seconds();
        let target_distance = target.target_miles();

        let time_progress_percent = (total_running_time as f64 / target_time as f64) * 100.0;
        let distance_progress_percent = (total_distance / target_distance) * 100.0;

        let estimated_sessions_remaining = if total_running_time > 0 {
            let avg_session_time =
                total_running_time as f64 / total_sessions.max(1) as f64;
            (target_time - total_running_time) as f64 / avg_session_time
        } else {
            0.0
        };

        Self {
            total_sessions,
            total_running_time,
            total_distance,
            target_time,
            target_distance,
            time_progress_percent,
            distance_progress_percent,
            estimated_sessions_remaining,
            time_remaining: target_time - total_running_time,
            distance_remaining: target_distance - total_distance,
        }
    }
}

/// Per-day totals within a month.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyTotals {
    /// Distance covered that day, in miles.
    pub distance: f64,
    /// Net running time that day, in seconds.
    pub time: i64,
    /// Sessions started that day.
    pub sessions: usize,
    /// Calories burned that day.
    pub calories: i64,
}

/// Aggregated data for one calendar month.
///
/// A session belongs to the month its start time falls in (local time);
/// sessions spanning a boundary count wholly toward their start month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyData {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Sessions started in this month, in log order.
    pub sessions: Vec<SessionRecord>,
    /// Total distance for the month, in miles.
    pub total_distance: f64,
    /// Total net running time for the month, in seconds.
    pub total_time: i64,
    /// Number of sessions in the month.
    pub total_sessions: usize,
    /// Totals keyed by day of month (1-31); days without sessions absent.
    pub daily_data: BTreeMap<u32, DailyTotals>,
}

impl MonthlyData {
    /// Aggregate the sessions whose local start date falls in `year`/`month`.
    ///
    /// A month with no sessions yields zero totals and an empty breakdown.
    #[must_use]
    pub fn compute(sessions: &[SessionRecord], year: i32, month: u32) -> Self {
        let monthly: Vec<SessionRecord> = sessions
            .iter()
            .filter(|s| {
                let local = s.started_at_local();
                local.year() == year && local.month() == month
            })
            .cloned()
            .collect();

        let mut daily_data: BTreeMap<u32, DailyTotals> = BTreeMap::new();
        for session in &monthly {
            let day = session.started_at_local().day();
            let totals = daily_data.entry(day).or_default();
            totals.distance += session.distance_miles;
            totals.time += session.running_time;
            totals.sessions += 1;
            totals.calories += session.calories;
        }

        let total_distance = monthly.iter().map(|s| s.distance_miles).sum();
        let total_time = monthly.iter().map(|s| s.running_time).sum();
        let total_sessions = monthly.len();

        Self {
            year,
            month,
            sessions: monthly,
            total_distance,
            total_time,
            total_sessions,
            daily_data,
        }
    }
}
