//! Output formatting for stride.
//!
//! JSON for scripting, pretty helpers for terminal display.

mod json;
mod pretty;

pub use json::to_json;
pub use pretty::{format_miles, render_progress_bar};
