use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "stride")]
#[command(about = "Track running sessions toward a cross-country journey")]
#[command(long_about = "stride - a running session tracker

Tracks net active time across sessions, converts it to distance at a
steady 2.4 mph, and measures cumulative progress toward the full journey:
3 years, 2 months, 14 days, and 16 hours of running.

QUICK START:
  stride start              Begin a session
  stride break add 2m30s    Log a break you already took
  stride status             Live stats for the active session
  stride stop               Finish and save the session
  stride progress           Overall progress toward the goal

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  stride <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    /// Falls back to the config file's default when omitted.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Data directory (defaults to ~/.stride)
    #[arg(long, env = "STRIDE_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a new running session
    ///
    /// Creates a session and keeps it active until 'stride stop'. Only one
    /// session can run at a time; stop the current one before starting
    /// another.
    ///
    /// # Examples
    ///
    ///   stride start
    #[command(alias = "s")]
    Start,

    /// Manage breaks in the active session
    ///
    /// Breaks are subtracted from wall time when computing the session's
    /// net running time. Log one after the fact with 'break add', or time
    /// one live with 'break start' / 'break end'.
    #[command(alias = "b")]
    Break(BreakArgs),

    /// Stop the active session and save it
    ///
    /// Finalizes the session: subtracts breaks, computes distance and
    /// calories, appends the record to the session log, and prints the
    /// final statistics.
    Stop,

    /// Show live stats for the active session
    ///
    /// Reports elapsed time, net running time, break time, distance, and
    /// calories so far. Prints "No active session" when nothing is running.
    #[command(alias = "st")]
    Status,

    /// Show overall progress toward the journey goal
    ///
    /// Sums every saved session and compares against the full journey:
    /// time and distance percentages, remaining amounts, and an estimate
    /// of sessions left at your average pace.
    #[command(alias = "p")]
    Progress,

    /// Show aggregated data for a calendar month
    ///
    /// Totals and a per-day breakdown for the given month (defaults to the
    /// current month). Sessions belong to the month they started in.
    ///
    /// # Examples
    ///
    ///   stride month              Current month
    ///   stride month 2025 6       June 2025
    #[command(alias = "m")]
    Month(MonthArgs),

    /// List saved sessions, newest first
    #[command(alias = "h")]
    History(HistoryArgs),

    /// Export all data as a JSON bundle
    ///
    /// Writes sessions plus the current progress snapshot, either to a
    /// file or to stdout.
    Export(ExportArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   stride completions zsh > ~/.zfunc/_stride
    Completions(CompletionsArgs),
}

/// Arguments for the break command.
#[derive(Args)]
pub struct BreakArgs {
    #[command(subcommand)]
    pub command: BreakCommands,
}

#[derive(Subcommand)]
pub enum BreakCommands {
    /// Log a break you already took
    ///
    /// # Examples
    ///
    ///   stride break add 2m30s
    ///   stride break add 5        (bare numbers are minutes)
    ///   stride break add 90s
    Add {
        /// Break length, e.g. "2m30s", "90s", or bare minutes
        duration: String,
    },

    /// Start timing a break now
    Start,

    /// End the timed break and log its length
    End,
}

/// Arguments for the month command.
#[derive(Args)]
pub struct MonthArgs {
    /// Calendar year (defaults to the current year)
    pub year: Option<i32>,

    /// Calendar month, 1-12 (defaults to the current month)
    pub month: Option<u32>,
}

/// Arguments for the history command.
#[derive(Args)]
pub struct HistoryArgs {
    /// Maximum number of sessions to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Write the bundle to this file instead of stdout
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

/// Arguments for the completions command.
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_break_add_parses() {
        let cli = Cli::try_parse_from(["stride", "break", "add", "2m30s"]).unwrap();
        match cli.command {
            Commands::Break(args) => match args.command {
                BreakCommands::Add { duration } => assert_eq!(duration, "2m30s"),
                _ => panic!("expected break add"),
            },
            _ => panic!("expected break command"),
        }
    }

    #[test]
    fn test_month_defaults_to_none() {
        let cli = Cli::try_parse_from(["stride", "month"]).unwrap();
        match cli.command {
            Commands::Month(args) => {
                assert!(args.year.is_none());
                assert!(args.month.is_none());
            }
            _ => panic!("expected month command"),
        }
    }

    #[test]
    fn test_global_output_flag() {
        let cli = Cli::try_parse_from(["stride", "progress", "--output", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));

        let cli = Cli::try_parse_from(["stride", "progress"]).unwrap();
        assert!(cli.output.is_none());
    }
}
