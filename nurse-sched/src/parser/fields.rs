use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::error::CommandError;
use crate::records::{DATE_FORMAT, TIME_FORMAT};

static TIME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("time pattern is valid"));
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

/// How appointments can be reordered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Time,
    Importance,
}

/// Parses a 24-hour HH:MM time, e.g. "13:00". "1pm", "1300" and "24:00" are rejected.
pub fn parse_time(raw: &str) -> Result<NaiveTime, CommandError> {
    if !TIME_SHAPE.is_match(raw) {
        return Err(CommandError::InvalidTimeFormat);
    }
    NaiveTime::parse_from_str(raw, TIME_FORMAT).map_err(|_| CommandError::InvalidTimeFormat)
}

/// Parses a YYYY-MM-DD calendar date
pub fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    if !DATE_SHAPE.is_match(raw) {
        return Err(CommandError::InvalidDateFormat);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| CommandError::InvalidDateFormat)
}

/// Non-negative whole number such as a stock quantity or an age
pub fn parse_count(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// 1-based list index
pub fn parse_index(raw: &str) -> Option<usize> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok().filter(|&index| index >= 1)
}

pub fn parse_importance(raw: &str) -> Result<u8, CommandError> {
    match raw.parse::<u8>() {
        Ok(level @ 1..=3) => Ok(level),
        _ => Err(CommandError::InvalidImportance),
    }
}

pub fn parse_sort_key(raw: &str) -> Option<SortKey> {
    match raw.to_lowercase().as_str() {
        "time" => Some(SortKey::Time),
        "importance" => Some(SortKey::Importance),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_accepts_24_hour() {
        assert_eq!(parse_time("13:00"), Ok(NaiveTime::from_hms_opt(13, 0, 0).unwrap()));
        assert_eq!(parse_time("00:05"), Ok(NaiveTime::from_hms_opt(0, 5, 0).unwrap()));
        assert_eq!(parse_time("23:59"), Ok(NaiveTime::from_hms_opt(23, 59, 0).unwrap()));
    }

    #[test]
    fn test_parse_time_rejects_malformed() {
        for raw in ["25:00", "24:00", "1pm", "1300", "1:00", "13:60", "", "13:00pm"] {
            assert_eq!(parse_time(raw), Err(CommandError::InvalidTimeFormat), "{raw}");
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-02-15"), Ok(NaiveDate::from_ymd_opt(2026, 2, 15).unwrap()));
        for raw in ["15-02-2026", "2025-15-02", "2026-02-30", "05 June 2025", "2026-2-5"] {
            assert_eq!(parse_date(raw), Err(CommandError::InvalidDateFormat), "{raw}");
        }
    }

    #[test]
    fn test_parse_count_and_index() {
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count("20"), Some(20));
        assert_eq!(parse_count("-3"), None);
        assert_eq!(parse_count("ten"), None);

        assert_eq!(parse_index("1"), Some(1));
        assert_eq!(parse_index("0"), None);
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index(""), None);
    }

    #[test]
    fn test_parse_importance_range() {
        assert_eq!(parse_importance("1"), Ok(1));
        assert_eq!(parse_importance("3"), Ok(3));
        assert_eq!(parse_importance("0"), Err(CommandError::InvalidImportance));
        assert_eq!(parse_importance("high"), Err(CommandError::InvalidImportance));
    }
}
