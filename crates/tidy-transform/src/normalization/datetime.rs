//! Date and timestamp parsing for cast rules.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Accepted date layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Accepted timestamp layouts, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a calendar date.
///
/// A full timestamp is accepted too and truncated to its date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| parse_datetime_only(trimmed).map(|dt| dt.date()))
}

/// Parse a timestamp.
///
/// A bare date is accepted too and placed at midnight.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_datetime_only(trimmed).or_else(|| {
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    })
}

/// Interpret an integer as seconds since the Unix epoch (UTC).
pub fn from_unix_seconds(seconds: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.naive_utc())
}

fn parse_datetime_only(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2012-03-01"), Some(date(2012, 3, 1)));
        assert_eq!(parse_date("2012/03/01"), Some(date(2012, 3, 1)));
        assert_eq!(parse_date("10/31/2013"), Some(date(2013, 10, 31)));
        assert_eq!(parse_date("2012-03-01 14:00:00"), Some(date(2012, 3, 1)));
    }

    #[test]
    fn test_parse_date_invalid() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2012-13-01"), None);
        assert_eq!(parse_date("NO CLUE"), None);
    }

    #[test]
    fn test_parse_datetime_formats() {
        let expected = date(2013, 10, 31).and_hms_opt(2, 8, 41).unwrap();
        assert_eq!(parse_datetime("10/31/2013 02:08:41 AM"), Some(expected));
        assert_eq!(parse_datetime("2013-10-31 02:08:41"), Some(expected));
        assert_eq!(parse_datetime("2013-10-31T02:08:41"), Some(expected));
        assert_eq!(
            parse_datetime("2012-03-01 14:00"),
            date(2012, 3, 1).and_hms_opt(14, 0, 0)
        );
    }

    #[test]
    fn test_parse_datetime_pm() {
        assert_eq!(
            parse_datetime("10/31/2013 02:08:41 PM"),
            date(2013, 10, 31).and_hms_opt(14, 8, 41)
        );
    }

    #[test]
    fn test_parse_datetime_from_date() {
        assert_eq!(
            parse_datetime("2012-03-01"),
            date(2012, 3, 1).and_hms_opt(0, 0, 0)
        );
    }

    #[test]
    fn test_from_unix_seconds() {
        assert_eq!(
            from_unix_seconds(1_387_295_797),
            date(2013, 12, 17).and_hms_opt(15, 56, 37)
        );
        assert_eq!(from_unix_seconds(0), date(1970, 1, 1).and_hms_opt(0, 0, 0));
    }
}
