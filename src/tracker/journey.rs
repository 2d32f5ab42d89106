//! The fixed journey target.
//!
//! The goal mirrors Forrest Gump's run: 3 years, 2 months, 14 days, and
//! 16 hours of running at a steady 2.4 mph. Years count as 365 days and
//! months as 30 days when converting to seconds.

use serde::{Deserialize, Serialize};

use super::session::distance_for;

/// The cumulative time/distance goal all sessions count toward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JourneyTarget {
    /// Whole years of running.
    pub years: i64,
    /// Additional months (30 days each).
    pub months: i64,
    /// Additional days.
    pub days: i64,
    /// Additional hours.
    pub hours: i64,
    /// Steady speed in miles per hour.
    pub speed_mph: f64,
}

impl JourneyTarget {
    /// The full journey goal, usable in const context.
    #[must_use]
    pub const fn default_const() -> Self {
        Self {
            years: 3,
            months: 2,
            days: 14,
            hours: 16,
            speed_mph: 2.4,
        }
    }

    /// Total target duration in seconds.
    #[must_use]
    pub const fn target_seconds(&self) -> i64 {
        let total_days = self.years * 365 + self.months * 30 + self.days;
        let total_hours = total_days * 24 + self.hours;
        total_hours * 3600
    }

    /// Total target distance in miles.
    #[must_use]
    pub fn target_miles(&self) -> f64 {
        distance_for(self.target_seconds(), self.speed_mph)
    }
}

impl Default for JourneyTarget {
    fn default() -> Self {
        Self::default_const()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target_seconds() {
        let target = JourneyTarget::default();
        // (3*365 + 2*30 + 14) days = 1169 days; *24 + 16 = 28072 hours.
        assert_eq!(target.target_seconds(), 28_072 * 3600);
    }

    #[test]
    fn test_default_target_miles() {
        let target = JourneyTarget::default();
        assert!((target.target_miles() - 28_072.0 * 2.4).abs() < 1e-6);
    }

    #[test]
    fn test_small_target() {
        let target = JourneyTarget {
            years: 0,
            months: 0,
            days: 0,
            hours: 1,
            speed_mph: 2.4,
        };
        assert_eq!(target.target_seconds(), 3600);
        assert!((target.target_miles() - 2.4).abs() < 1e-9);
    }
}
