//! Configuration management for stride.
//!
//! This module handles loading configuration from `~/.stride/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, HistoryConfig};
