use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Rendered by [`format_date`] for input it cannot parse.
pub const INVALID_DATE: &str = "Invalid Date";

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Format a timestamp as a long en-US date, e.g. `March 1, 2024`.
///
/// Accepts `YYYY-MM-DD HH:MM:SS` (the API's column format), RFC 3339, and
/// bare `YYYY-MM-DD`. RFC 3339 values are rendered in their own offset.
pub fn format_date(raw: &str) -> String {
    match parse_day(raw.trim()) {
        Some(day) => day.format("%B %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// The date part of a datetime string: everything before the first space.
///
/// Input without a space is returned whole.
pub fn extract_date(datetime: &str) -> &str {
    datetime.split(' ').next().unwrap_or(datetime)
}
