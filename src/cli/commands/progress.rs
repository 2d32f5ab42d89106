//! Read-only query commands: progress, month, history, export.

use std::path::Path;

use chrono::{Datelike, Local, NaiveDate, Utc};
use colored::Colorize;
use serde::Serialize;
use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::core::format_hms;
use crate::error::StrideError;
use crate::output::{format_miles, render_progress_bar, to_json};
use crate::tracker::{
    JourneyTarget, LoadedLog, MonthlyData, Progress, SessionLog, SessionRecord,
};

/// Show overall progress toward the journey goal.
///
/// # Errors
///
/// Returns an error if the session log cannot be read.
pub fn progress(paths: &Paths, format: OutputFormat) -> Result<String, StrideError> {
    let loaded = load_log(paths)?;
    let target = JourneyTarget::default();
    let progress = Progress::compute(&loaded.sessions, &target);

    match format {
        OutputFormat::Json => to_json(&progress),
        OutputFormat::Pretty => {
            let mut output = Vec::new();
            output.push("🏃 Journey Progress".bold().to_string());
            output.push("═".repeat(50));
            output.push(String::new());

            output.push(format!(
                "Distance: {} {:>6.2}%",
                render_progress_bar(progress.distance_progress_percent / 100.0, 30),
                progress.distance_progress_percent
            ));
            output.push(format!(
                "Time:     {} {:>6.2}%",
                render_progress_bar(progress.time_progress_percent / 100.0, 30),
                progress.time_progress_percent
            ));
            output.push(String::new());

            output.push(format!("Sessions:        {}", progress.total_sessions));
            output.push(format!(
                "Distance so far: {} of {}",
                format_miles(progress.total_distance),
                format_miles(progress.target_distance)
            ));
            output.push(format!(
                "Time so far:     {} of {}",
                format_hms(progress.total_running_time),
                format_hms(progress.target_time)
            ));
            output.push(format!(
                "Remaining:       {} / {}",
                format_miles(progress.distance_remaining),
                format_hms(progress.time_remaining)
            ));

            if progress.total_running_time > 0 {
                output.push(format!(
                    "At your pace:    ~{:.0} sessions to go",
                    progress.estimated_sessions_remaining
                ));
            }

            Ok(output.join("\n"))
        }
    }
}

/// Show aggregated data for one calendar month.
///
/// # Errors
///
/// Returns an error for an invalid month number or an unreadable log.
pub fn month(
    paths: &Paths,
    year: Option<i32>,
    month: Option<u32>,
    format: OutputFormat,
) -> Result<String, StrideError> {
    let now = Local::now();
    let year = year.unwrap_or_else(|| now.year());
    let month = month.unwrap_or_else(|| now.month());

    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| StrideError::Config(format!("Invalid month: {year}-{month}")))?;

    let loaded = load_log(paths)?;
    let data = MonthlyData::compute(&loaded.sessions, year, month);

    match format {
        OutputFormat::Json => to_json(&data),
        OutputFormat::Pretty => {
            let mut output = Vec::new();
            output.push(
                format!("📅 {}", first_of_month.format("%B %Y"))
                    .bold()
                    .to_string(),
            );
            output.push("═".repeat(50));

            if data.total_sessions == 0 {
                output.push("No sessions this month.".to_string());
                return Ok(output.join("\n"));
            }

            output.push(format!(
                "Sessions: {}   Distance: {}   Time: {}",
                data.total_sessions,
                format_miles(data.total_distance),
                format_hms(data.total_time)
            ));
            output.push(String::new());

            output.push(format!(
                "{:<5} {:>9} {:>10} {:>10} {:>9}",
                "Day", "Sessions", "Time", "Distance", "Calories"
            ));
            output.push("─".repeat(50));

            for (day, totals) in &data.daily_data {
                output.push(format!(
                    "{:<5} {:>9} {:>10} {:>10} {:>9}",
                    day,
                    totals.sessions,
                    format_hms(totals.time),
                    format_miles(totals.distance),
                    totals.calories
                ));
            }

            Ok(output.join("\n"))
        }
    }
}

/// List saved sessions, newest first.
///
/// # Errors
///
/// Returns an error if the session log cannot be read.
pub fn history(
    paths: &Paths,
    limit: usize,
    format: OutputFormat,
) -> Result<String, StrideError> {
    let loaded = load_log(paths)?;
    let recent: Vec<&SessionRecord> = loaded.sessions.iter().rev().take(limit).collect();

    match format {
        OutputFormat::Json => to_json(&recent),
        OutputFormat::Pretty => {
            if recent.is_empty() {
                return Ok(
                    "No sessions recorded yet.\n\nStart one with: stride start".to_string()
                );
            }

            let mut output = Vec::new();
            output.push("📋 Session History".bold().to_string());
            output.push("═".repeat(60));
            output.push(String::new());

            output.push(format!(
                "{:<17} {:>10} {:>10} {:>9} {:>7}",
                "Started", "Running", "Distance", "Calories", "Breaks"
            ));
            output.push("─".repeat(60));

            for session in recent {
                output.push(format!(
                    "{:<17} {:>10} {:>10} {:>9} {:>7}",
                    session.started_at_local().format("%Y-%m-%d %H:%M"),
                    format_hms(session.running_time),
                    format_miles(session.distance_miles),
                    session.calories,
                    session.breaks.len()
                ));
            }

            Ok(output.join("\n"))
        }
    }
}

/// Everything stride knows, bundled for export.
#[derive(Debug, Serialize)]
struct ExportBundle {
    /// When the export was produced.
    export_date: chrono::DateTime<Utc>,
    /// The journey goal the data counts toward.
    target: JourneyTarget,
    /// Progress snapshot at export time.
    progress: Progress,
    /// Number of sessions included.
    total_sessions: usize,
    /// All persisted sessions in log order.
    sessions: Vec<SessionRecord>,
}

/// Export all data as a JSON bundle, to a file or stdout.
///
/// # Errors
///
/// Returns an error if the log cannot be read or the file cannot be written.
pub fn export(
    paths: &Paths,
    path: Option<&Path>,
    format: OutputFormat,
) -> Result<String, StrideError> {
    let loaded = load_log(paths)?;
    let target = JourneyTarget::default();

    let bundle = ExportBundle {
        export_date: Utc::now(),
        target,
        progress: Progress::compute(&loaded.sessions, &target),
        total_sessions: loaded.sessions.len(),
        sessions: loaded.sessions,
    };

    let content = to_json(&bundle)?;

    match path {
        None => Ok(content),
        Some(file) => {
            std::fs::write(file, &content)?;
            match format {
                OutputFormat::Json => to_json(&json!({
                    "exported_to": file.display().to_string(),
                    "total_sessions": bundle.total_sessions,
                })),
                OutputFormat::Pretty => Ok(format!(
                    "📦 Exported {} session{} to {}",
                    bundle.total_sessions,
                    if bundle.total_sessions == 1 { "" } else { "s" },
                    file.display()
                )),
            }
        }
    }
}

/// Load the session log, warning on stderr when a corrupt file was
/// recovered as empty.
fn load_log(paths: &Paths) -> Result<LoadedLog, StrideError> {
    paths.ensure_dirs()?;
    let log = SessionLog::new(paths.sessions_file.clone(), paths.active_file.clone());
    let loaded = log.load_all()?;

    if loaded.recovered {
        eprintln!(
            "{}: session log was unreadable and is being treated as empty",
            "warning".yellow().bold()
        );
    }

    Ok(loaded)
}
