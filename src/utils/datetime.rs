//! Datetime handling for schedule labels and start times
//!
//! Feeds deliver times in two shapes: catalogue items carry unix seconds
//! (as a number or a string), the schedule feed carries
//! `2025-05-03T19:00:00.000Z` style UTC timestamps. Everything rendered to
//! the outputs is a plain `HH:MM` time or a day label.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde_json::Value;
use thiserror::Error;

/// Start time used whenever a timestamp is absent or unusable
pub const DEFAULT_START_TIME: &str = "00:00";

/// Format of the schedule feed `matchDate` field
pub const MATCH_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Errors that can occur during datetime operations
#[derive(Error, Debug)]
pub enum DateTimeError {
    /// Invalid datetime format provided
    #[error("Invalid datetime format: '{input}' - expected {expected}")]
    InvalidFormat { input: String, expected: String },

    /// Timestamp is outside the representable range
    #[error("Timestamp out of range: {input}")]
    OutOfRange { input: String },
}

/// Read unix seconds from a JSON number or numeric string
pub fn parse_unix_seconds(value: &Value) -> Result<i64, DateTimeError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| DateTimeError::InvalidFormat {
        input: value.to_string(),
        expected: "unix seconds".to_string(),
    })
}

/// Convert unix seconds to wall-clock `HH:MM` in the given timezone
pub fn unix_to_wall_clock(value: &Value, tz: &Tz) -> Result<String, DateTimeError> {
    let secs = parse_unix_seconds(value)?;
    let utc = DateTime::from_timestamp(secs, 0).ok_or_else(|| DateTimeError::OutOfRange {
        input: secs.to_string(),
    })?;
    Ok(utc.with_timezone(tz).format("%H:%M").to_string())
}

/// Start time for a catalogue item, never failing
pub fn start_time_or_default(value: Option<&Value>, tz: &Tz) -> String {
    value
        .and_then(|v| unix_to_wall_clock(v, tz).ok())
        .unwrap_or_else(|| DEFAULT_START_TIME.to_string())
}

/// Parse a schedule feed `matchDate` (UTC)
pub fn parse_match_date(input: &str) -> Result<NaiveDateTime, DateTimeError> {
    NaiveDateTime::parse_from_str(input.trim(), MATCH_DATE_FORMAT).map_err(|_| {
        DateTimeError::InvalidFormat {
            input: input.to_string(),
            expected: MATCH_DATE_FORMAT.to_string(),
        }
    })
}

/// Day label used to bucket schedule entries, e.g. `Saturday 3th May - Schedule Time UK GMT`.
///
/// The `th` suffix is fixed regardless of the day, which is what the
/// downstream players key on.
pub fn bucket_key(dt: &NaiveDateTime, suffix: &str) -> String {
    format!(
        "{} {}th {}{}",
        dt.format("%A"),
        dt.day(),
        dt.format("%B"),
        suffix
    )
}

/// Date label for the grouped schedule document
pub fn date_label(date: NaiveDate, format: &str, suffix: &str) -> String {
    format!("{}{}", date.format(format), suffix)
}

/// Whether a strftime pattern can be rendered without error
pub fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(1714762800), "19:00")]
    #[case(json!("1714762800"), "19:00")]
    #[case(json!(" 1714762800 "), "19:00")]
    #[case(json!(1714762800.9), "19:00")]
    #[case(json!("19:00"), "00:00")]
    #[case(json!("1714762800.5"), "00:00")]
    #[case(json!(true), "00:00")]
    #[case(json!(null), "00:00")]
    #[case(json!({"ts": 1}), "00:00")]
    #[case(json!(i64::MAX), "00:00")]
    fn test_start_time_or_default(#[case] raw: Value, #[case] expected: &str) {
        assert_eq!(start_time_or_default(Some(&raw), &Tz::UTC), expected);
    }

    #[test]
    fn test_start_time_missing() {
        assert_eq!(start_time_or_default(None, &Tz::UTC), DEFAULT_START_TIME);
    }

    #[test]
    fn test_start_time_follows_timezone() {
        let london: Tz = "Europe/London".parse().unwrap();
        // 2024-05-03 19:00 UTC is 20:00 BST
        assert_eq!(start_time_or_default(Some(&json!(1714762800)), &london), "20:00");
    }

    #[test]
    fn test_parse_match_date() {
        let dt = parse_match_date("2025-05-03T19:45:00.000Z").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "19:45");
        assert!(parse_match_date("03/05/2025 19:45").is_err());
        assert!(parse_match_date("2025-05-03T19:45:00.000+01:00").is_err());
        assert!(parse_match_date("").is_err());
    }

    #[test]
    fn test_bucket_key() {
        let dt = parse_match_date("2025-05-03T19:45:00.000Z").unwrap();
        assert_eq!(
            bucket_key(&dt, " - Schedule Time UK GMT"),
            "Saturday 3th May - Schedule Time UK GMT"
        );
    }

    #[test]
    fn test_date_label() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 3).unwrap();
        assert_eq!(
            date_label(date, "%A %dth %B %Y", " - Schedule Time UK GMT"),
            "Saturday 03th May 2025 - Schedule Time UK GMT"
        );
    }

    #[test]
    fn test_is_valid_format() {
        assert!(is_valid_format("%A %dth %B %Y"));
        assert!(!is_valid_format("%A %Q"));
    }
}
