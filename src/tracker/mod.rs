//! Session tracking core.
//!
//! The session engine ([`Tracker`]) manages the single active session and
//! its lifecycle; the progress types ([`Progress`], [`MonthlyData`]) turn
//! the persisted log into rollups toward the journey target.

mod engine;
mod journey;
mod log;
mod progress;
mod session;

pub use engine::Tracker;
pub use journey::JourneyTarget;
pub use log::{LoadedLog, SessionLog};
pub use progress::{DailyTotals, MonthlyData, Progress};
pub use session::{BreakEntry, LiveStats, SessionRecord, SessionSummary};
