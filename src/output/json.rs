//! JSON output formatting for stride.

use serde::Serialize;

use crate::error::StrideError;

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `StrideError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, StrideError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::SessionSummary;

    #[test]
    fn test_to_json_summary() {
        let summary = SessionSummary {
            session_id: "2025-06-01T08:00:00+00:00".to_string(),
            total_duration: 3700,
            running_time: 3550,
            break_time: 150,
            distance_miles: 2.3667,
            calories: 236,
            breaks_count: 1,
        };

        let result = to_json(&summary).unwrap();

        assert!(result.contains("\"running_time\": 3550"));
        assert!(result.contains("\"break_time\": 150"));
        assert!(result.contains("\"breaks_count\": 1"));
    }

    #[test]
    fn test_json_preserves_special_characters() {
        let value = serde_json::json!({ "note": "line 1\nline 2\t\"quoted\"" });
        let result = to_json(&value).unwrap();

        assert!(result.contains("\\n"));
        assert!(result.contains("\\t"));
        assert!(result.contains("\\\"quoted\\\""));
    }
}
