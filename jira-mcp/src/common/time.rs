//! Time helpers for the Jira wire format
//!
//! Jira timestamps look like `2024-01-15T09:30:00.000+0000`, which is close to but
//! not quite RFC 3339 (no colon in the offset).

use crate::{JiraMcpError, Result};
use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Format used by Jira for `started`, `created` and `updated` fields
pub const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
/// Jira's default working day
const SECONDS_PER_DAY: i64 = 8 * SECONDS_PER_HOUR;
/// Jira's default working week
const SECONDS_PER_WEEK: i64 = 5 * SECONDS_PER_DAY;

static DURATION_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d+(?:\.\d+)?)(w|d|h|m|s)$").expect("valid duration regex"));

/// Parse a Jira timestamp, accepting both the Jira form and RFC 3339
pub fn parse_jira_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
}

/// Reformat a Jira timestamp as `YYYY-MM-DD HH:MM:SS`, returning the input when it cannot be parsed
pub fn format_timestamp(value: &str) -> String {
    parse_jira_timestamp(value)
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Calendar day of a Jira timestamp
pub fn timestamp_date(value: &str) -> Option<NaiveDate> {
    parse_jira_timestamp(value).map(|ts| ts.date_naive())
}

/// Current local time in Jira's timestamp format
pub fn now_jira_timestamp() -> String {
    Local::now().format(JIRA_TIMESTAMP_FORMAT).to_string()
}

/// Convert a time-spent value into seconds.
///
/// A bare integer is taken as seconds. Otherwise the value is a whitespace
/// separated list of `<number><unit>` parts such as `1h 30m` or `2d`, where a
/// day is eight hours and a week five days.
pub fn parse_time_spent(value: &str) -> Result<i64> {
    let trimmed = value.trim();
    if let Ok(seconds) = trimmed.parse::<i64>() {
        if seconds > 0 {
            return Ok(seconds);
        }
        return Err(JiraMcpError::validation(format!(
            "invalid time_spent format: time spent must be positive, got {trimmed}"
        )));
    }

    let mut total = 0f64;
    let mut parts = 0;
    for part in trimmed.split_whitespace() {
        let captures = DURATION_PART.captures(part).ok_or_else(|| {
            JiraMcpError::validation(format!("invalid time_spent format: could not parse time: {value}"))
        })?;
        let amount: f64 = captures[1].parse().map_err(|_| {
            JiraMcpError::validation(format!("invalid time_spent format: could not parse time: {value}"))
        })?;
        let unit = match captures[2].to_ascii_lowercase().as_str() {
            "w" => SECONDS_PER_WEEK,
            "d" => SECONDS_PER_DAY,
            "h" => SECONDS_PER_HOUR,
            "m" => SECONDS_PER_MINUTE,
            _ => 1,
        };
        total += amount * unit as f64;
        parts += 1;
    }

    let seconds = total.round() as i64;
    if parts == 0 || seconds <= 0 {
        return Err(JiraMcpError::validation(format!(
            "invalid time_spent format: could not parse time: {value}"
        )));
    }
    Ok(seconds)
}
