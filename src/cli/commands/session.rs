//! Session lifecycle commands: start, break, stop, status.

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::core::{format_duration, format_hms, parse_duration, split_minutes_seconds};
use crate::error::StrideError;
use crate::output::{format_miles, to_json};
use crate::tracker::Tracker;

use super::{open_tracker, persist_active};

/// Start a new running session.
///
/// # Errors
///
/// Returns `AlreadyActive` if a session is already running.
pub fn start(paths: &Paths, format: OutputFormat) -> Result<String, StrideError> {
    let mut tracker = open_tracker(paths)?;
    let session_id = tracker.start()?;
    persist_active(&tracker)?;

    match format {
        OutputFormat::Json => to_json(&json!({ "session_id": session_id })),
        OutputFormat::Pretty => {
            let mut output = Vec::new();
            output.push("🏃 Session started!".green().to_string());
            output.push(format!("   Session ID: {session_id}"));
            output.push(String::new());
            output.push("   Use 'stride status' to check progress".dimmed().to_string());
            output.push("   Use 'stride stop' when done".dimmed().to_string());
            Ok(output.join("\n"))
        }
    }
}

/// Log a break that already happened.
///
/// # Errors
///
/// Returns `InvalidBreak` for unparseable or non-positive durations, or
/// `NoActiveSession` if nothing is running.
pub fn break_add(
    paths: &Paths,
    duration: &str,
    format: OutputFormat,
) -> Result<String, StrideError> {
    let parsed = parse_duration(duration)
        .ok_or_else(|| StrideError::InvalidBreak(format!("could not parse '{duration}'")))?;
    let (minutes, seconds) = split_minutes_seconds(parsed);

    let mut tracker = open_tracker(paths)?;
    tracker.add_break(minutes, seconds)?;
    persist_active(&tracker)?;

    render_break_logged(&tracker, minutes, seconds, format)
}

/// Start timing a break against the wall clock.
///
/// # Errors
///
/// Returns `NoActiveSession` if nothing is running, or a config error if a
/// break is already being timed.
pub fn break_start(paths: &Paths, format: OutputFormat) -> Result<String, StrideError> {
    let tracker = open_tracker(paths)?;
    if tracker.active().is_none() {
        return Err(StrideError::NoActiveSession);
    }
    if read_break_marker(paths)?.is_some() {
        return Err(StrideError::Config(
            "A break is already being timed. End it with 'stride break end'.".to_string(),
        ));
    }

    let now = Utc::now();
    write_break_marker(paths, now)?;

    match format {
        OutputFormat::Json => to_json(&json!({ "break_started_at": now })),
        OutputFormat::Pretty => Ok(format!(
            "☕ Break started\n   {}",
            "Use 'stride break end' to get back to running".dimmed()
        )),
    }
}

/// End the timed break and record its length.
///
/// # Errors
///
/// Returns `NotFound` if no break is being timed, or `NoActiveSession` if
/// nothing is running.
pub fn break_end(paths: &Paths, format: OutputFormat) -> Result<String, StrideError> {
    let started_at = read_break_marker(paths)?
        .ok_or_else(|| StrideError::NotFound("No break is being timed".to_string()))?;

    let mut tracker = open_tracker(paths)?;
    let (minutes, seconds) = elapsed_break(started_at, Utc::now());
    tracker.add_break(minutes, seconds)?;
    clear_break_marker(paths)?;
    persist_active(&tracker)?;

    render_break_logged(&tracker, minutes, seconds, format)
}

/// Stop the active session and print its final statistics.
///
/// A break still being timed is folded into the session before stopping.
///
/// # Errors
///
/// Returns `NoActiveSession` if nothing is running.
pub fn stop(paths: &Paths, format: OutputFormat) -> Result<String, StrideError> {
    let mut tracker = open_tracker(paths)?;

    if let Some(started_at) = read_break_marker(paths)? {
        let (minutes, seconds) = elapsed_break(started_at, Utc::now());
        tracker.add_break(minutes, seconds)?;
        clear_break_marker(paths)?;
    }

    let summary = tracker.stop()?;
    persist_active(&tracker)?;

    match format {
        OutputFormat::Json => to_json(&summary),
        OutputFormat::Pretty => {
            let mut output = Vec::new();
            output.push("✅ Session complete!".green().bold().to_string());
            output.push("─".repeat(40));
            output.push(format!(
                "Total time:    {}",
                format_hms(summary.total_duration)
            ));
            output.push(format!(
                "Running time:  {}",
                format_hms(summary.running_time)
            ));
            output.push(format!(
                "Break time:    {} ({} break{})",
                format_hms(summary.break_time),
                summary.breaks_count,
                if summary.breaks_count == 1 { "" } else { "s" }
            ));
            output.push(format!(
                "Distance:      {}",
                format_miles(summary.distance_miles)
            ));
            output.push(format!("Calories:      {}", summary.calories));
            output.push(String::new());
            output.push(
                "   See the bigger picture with 'stride progress'"
                    .dimmed()
                    .to_string(),
            );
            Ok(output.join("\n"))
        }
    }
}

/// Show live statistics for the active session.
///
/// Absence of a session is reported as data, not as an error.
///
/// # Errors
///
/// Returns an error only if the data directory cannot be read.
pub fn status(paths: &Paths, format: OutputFormat) -> Result<String, StrideError> {
    let tracker = open_tracker(paths)?;

    let Some(stats) = tracker.stats() else {
        return match format {
            OutputFormat::Json => to_json(&json!({ "error": "No active session" })),
            OutputFormat::Pretty => {
                Ok("No active session.\n\nStart one with: stride start".to_string())
            }
        };
    };

    match format {
        OutputFormat::Json => to_json(&stats),
        OutputFormat::Pretty => {
            let on_break = read_break_marker(paths)?.is_some();
            let state_icon = if on_break { "☕" } else { "▶️" };

            let mut output = Vec::new();
            output.push(format!("{state_icon} Running Session"));
            output.push("─".repeat(40));

            if let Some(session) = tracker.active() {
                output.push(format!(
                    "Started:      {}",
                    session.started_at_local().format("%H:%M")
                ));
            }

            output.push(format!("Elapsed:      {}", format_hms(stats.session_time)));
            output.push(format!("Running:      {}", format_hms(stats.running_time)));
            output.push(format!(
                "Breaks:       {} ({} total)",
                stats.breaks_count,
                format_hms(stats.break_time)
            ));
            output.push(format!(
                "Distance:     {}",
                format_miles(stats.distance_miles)
            ));
            output.push(format!("Calories:     {}", stats.calories));

            if on_break {
                output.push(String::new());
                output.push(
                    "☕ On a break. 'stride break end' to resume."
                        .yellow()
                        .to_string(),
                );
            }

            Ok(output.join("\n"))
        }
    }
}

/// Shared output for both manual and timed break logging.
fn render_break_logged(
    tracker: &Tracker,
    minutes: i64,
    seconds: i64,
    format: OutputFormat,
) -> Result<String, StrideError> {
    let total_break_time = tracker.active().map_or(0, |s| s.total_break_time);

    match format {
        OutputFormat::Json => to_json(&json!({
            "minutes": minutes,
            "seconds": seconds,
            "total_break_time": total_break_time,
        })),
        OutputFormat::Pretty => Ok(format!(
            "☕ Break logged: {}\n   Total break time this session: {}",
            format_duration(chrono::Duration::seconds(minutes * 60 + seconds)),
            format_hms(total_break_time)
        )),
    }
}

/// Convert a live break span into minutes and seconds, rounding zero-length
/// spans up to one second so they pass validation.
fn elapsed_break(started_at: DateTime<Utc>, now: DateTime<Utc>) -> (i64, i64) {
    let elapsed = now.signed_duration_since(started_at).num_seconds().max(1);
    (elapsed / 60, elapsed % 60)
}

fn read_break_marker(paths: &Paths) -> Result<Option<DateTime<Utc>>, StrideError> {
    if !paths.break_file.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&paths.break_file)?;
    Ok(serde_json::from_str(&content).ok())
}

fn write_break_marker(paths: &Paths, at: DateTime<Utc>) -> Result<(), StrideError> {
    let content = serde_json::to_string(&at)?;
    std::fs::write(&paths.break_file, content)?;
    Ok(())
}

fn clear_break_marker(paths: &Paths) -> Result<(), StrideError> {
    if paths.break_file.exists() {
        std::fs::remove_file(&paths.break_file)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn test_paths(temp_dir: &TempDir) -> Paths {
        Paths::with_root(temp_dir.path().to_path_buf())
    }

    #[test]
    fn test_start_then_status_then_stop() {
        let temp_dir = TempDir::new().unwrap();
        let paths = test_paths(&temp_dir);

        start(&paths, OutputFormat::Json).unwrap();
        assert!(paths.active_file.exists());

        let status_out = status(&paths, OutputFormat::Json).unwrap();
        assert!(status_out.contains("running_time"));

        let stop_out = stop(&paths, OutputFormat::Json).unwrap();
        assert!(stop_out.contains("session_id"));
        assert!(!paths.active_file.exists());
        assert!(paths.sessions_file.exists());
    }

    #[test]
    fn test_double_start_fails() {
        let temp_dir = TempDir::new().unwrap();
        let paths = test_paths(&temp_dir);

        start(&paths, OutputFormat::Json).unwrap();
        let err = start(&paths, OutputFormat::Json).unwrap_err();
        assert!(matches!(err, StrideError::AlreadyActive));
    }

    #[test]
    fn test_status_without_session_reports_absence_as_data() {
        let temp_dir = TempDir::new().unwrap();
        let paths = test_paths(&temp_dir);

        let out = status(&paths, OutputFormat::Json).unwrap();
        assert!(out.contains("No active session"));
    }

    #[test]
    fn test_break_add_requires_session() {
        let temp_dir = TempDir::new().unwrap();
        let paths = test_paths(&temp_dir);

        let err = break_add(&paths, "2m", OutputFormat::Json).unwrap_err();
        assert!(matches!(err, StrideError::NoActiveSession));
    }

    #[test]
    fn test_break_add_bad_duration() {
        let temp_dir = TempDir::new().unwrap();
        let paths = test_paths(&temp_dir);
        start(&paths, OutputFormat::Json).unwrap();

        let err = break_add(&paths, "nope", OutputFormat::Json).unwrap_err();
        assert!(matches!(err, StrideError::InvalidBreak(_)));
    }

    #[test]
    fn test_break_add_persists_across_invocations() {
        let temp_dir = TempDir::new().unwrap();
        let paths = test_paths(&temp_dir);

        start(&paths, OutputFormat::Json).unwrap();
        break_add(&paths, "2m30s", OutputFormat::Json).unwrap();

        // Fresh tracker sees the restored slot with the break applied.
        let tracker = open_tracker(&paths).unwrap();
        let active = tracker.active().unwrap();
        assert_eq!(active.total_break_time, 150);
        assert_eq!(active.breaks.len(), 1);
    }

    #[test]
    fn test_live_break_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = test_paths(&temp_dir);

        start(&paths, OutputFormat::Json).unwrap();
        break_start(&paths, OutputFormat::Json).unwrap();
        assert!(paths.break_file.exists());

        let err = break_start(&paths, OutputFormat::Json).unwrap_err();
        assert!(matches!(err, StrideError::Config(_)));

        break_end(&paths, OutputFormat::Json).unwrap();
        assert!(!paths.break_file.exists());

        let tracker = open_tracker(&paths).unwrap();
        assert_eq!(tracker.active().unwrap().breaks.len(), 1);
    }

    #[test]
    fn test_break_end_without_marker() {
        let temp_dir = TempDir::new().unwrap();
        let paths = test_paths(&temp_dir);
        start(&paths, OutputFormat::Json).unwrap();

        let err = break_end(&paths, OutputFormat::Json).unwrap_err();
        assert!(matches!(err, StrideError::NotFound(_)));
    }

    #[test]
    fn test_stop_folds_in_live_break() {
        let temp_dir = TempDir::new().unwrap();
        let paths = test_paths(&temp_dir);

        start(&paths, OutputFormat::Json).unwrap();
        break_start(&paths, OutputFormat::Json).unwrap();

        let out = stop(&paths, OutputFormat::Json).unwrap();
        assert!(out.contains("\"breaks_count\": 1"));
        assert!(!paths.break_file.exists());
    }

    #[test]
    fn test_stale_active_slot_is_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let paths = test_paths(&temp_dir);

        start(&paths, OutputFormat::Json).unwrap();
        let slot = std::fs::read_to_string(&paths.active_file).unwrap();
        stop(&paths, OutputFormat::Json).unwrap();

        // Simulate a stop whose slot-file delete failed: the session is in
        // the log but the slot file is back on disk.
        std::fs::write(&paths.active_file, slot).unwrap();

        let tracker = open_tracker(&paths).unwrap();
        assert!(tracker.active().is_none());
        assert!(!paths.active_file.exists());
        assert_eq!(tracker.log().load_all().unwrap().sessions.len(), 1);

        // The logged session cannot be stopped a second time.
        let err = stop(&paths, OutputFormat::Json).unwrap_err();
        assert!(matches!(err, StrideError::NoActiveSession));
    }

    #[test]
    fn test_stop_without_session() {
        let temp_dir = TempDir::new().unwrap();
        let paths = test_paths(&temp_dir);

        let err = stop(&paths, OutputFormat::Json).unwrap_err();
        assert!(matches!(err, StrideError::NoActiveSession));
    }

    #[test]
    fn test_elapsed_break_rounds_up_to_one_second() {
        let now = Utc::now();
        assert_eq!(elapsed_break(now, now), (0, 1));
        assert_eq!(elapsed_break(now, now + Duration::seconds(150)), (2, 30));
    }
}
