//! Core utilities for stride.
//!
//! Shared duration formatting and parsing used across commands.

mod time;

pub use time::{format_duration, format_hms, parse_duration, split_minutes_seconds};
