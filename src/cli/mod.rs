//! Command-line interface for stride.

pub mod args;
pub mod commands;
