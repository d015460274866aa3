//! Form Field Helpers
//!
//! Conversions between HTML input values and typed values.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATE_INPUT: &str = "%Y-%m-%d";
const TIME_INPUT: &str = "%H:%M";
const DATETIME_INPUT: &str = "%Y-%m-%dT%H:%M";

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_INPUT).ok()
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_INPUT).to_string()).unwrap_or_default()
}

pub fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_INPUT).ok()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_INPUT).to_string()
}

/// `datetime-local` value
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), DATETIME_INPUT).ok()
}

pub fn format_datetime(value: Option<NaiveDateTime>) -> String {
    value.map(|d| d.format(DATETIME_INPUT).to_string()).unwrap_or_default()
}

/// Display form used in tables and cards
pub fn display_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y/%m/%d").to_string()).unwrap_or_else(|| "-".to_string())
}

/// Empty input means "not set"
pub fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_inputs() {
        let date = parse_date("2025-06-30").unwrap();
        assert_eq!(format_date(Some(date)), "2025-06-30");
        assert_eq!(parse_date(""), None);
        assert_eq!(format_date(None), "");
        assert_eq!(display_date(Some(date)), "2025/06/30");
    }

    #[test]
    fn test_datetime_inputs() {
        let value = parse_datetime("2025-06-30T14:05").unwrap();
        assert_eq!(format_datetime(Some(value)), "2025-06-30T14:05");
        assert_eq!(format_time(value.time()), "14:05");
        assert_eq!(parse_time("14:05"), Some(value.time()));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  ".into()), None);
        assert_eq!(non_empty(" main ".into()).as_deref(), Some("main"));
    }
}
