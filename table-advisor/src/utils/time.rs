//! Time helpers for request parsing
//!
//! Hosts receive the reservation slot as strings; these helpers turn them
//! into the chrono types the engine works with.

use chrono::{NaiveDate, NaiveTime};

use crate::core::{AdvisorError, AdvisorResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AdvisorResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AdvisorError::Validation(format!("Invalid date format: {}", date)))
}

/// Parse a time string (HH:MM, 24h)
pub fn parse_time(time: &str) -> AdvisorResult<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AdvisorError::Validation(format!("Invalid time format: {}", time)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2026-03-21").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 3, 21).unwrap());
        assert!(parse_date("21/03/2026").is_err());
        assert!(parse_date("2026-02-30").is_err());
    }

    #[test]
    fn test_parse_time() {
        let time = parse_time("19:30").unwrap();
        assert_eq!((time.hour(), time.minute()), (19, 30));
        assert!(parse_time("7pm").is_err());
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn test_parse_errors_are_validation_errors() {
        let err = parse_time("").unwrap_err();
        assert!(matches!(err, AdvisorError::Validation(_)));
    }
}
