//! stride - a running session tracker
//!
//! This crate tracks net active time across running sessions, converts it
//! to distance at a fixed speed, and aggregates progress toward a fixed
//! cross-country journey target. Sessions persist to a flat JSON log.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod output;
pub mod tracker;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::StrideError;
pub use tracker::{JourneyTarget, Tracker};
