//! Textual forms of dates, clock times and durations.
//!
//! Sleep records are persisted and displayed with fixed, locale-independent
//! formats:
//!
//! | Value | Form |
//! |-------|------|
//! | Date | `YYYY-MM-DD` |
//! | Clock time | `HH:MM:SS` |
//! | Timestamp | `YYYY-MM-DDTHH:MM:SS` |
//! | Hours | shortest decimal form of a 2-decimal value (`7.5`, `6.25`) |

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, PrimitiveDateTime, Time};

use crate::error::{ParseError, ParseResult};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

const CLOCK_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]:[second]");

/// Timestamp layouts accepted on input, tried in order.
const TIMESTAMP_FORMATS: &[&[BorrowedFormatItem<'_>]] = &[
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
];

/// Format a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Format a wall-clock time as `HH:MM:SS`, dropping sub-second precision.
#[must_use]
pub fn format_clock(time: Time) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS`.
#[must_use]
pub fn format_timestamp(timestamp: PrimitiveDateTime) -> String {
    format!(
        "{}T{}",
        format_date(timestamp.date()),
        format_clock(timestamp.time())
    )
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> ParseResult<Date> {
    Date::parse(s.trim(), DATE_FORMAT).map_err(|_| ParseError::InvalidDate(s.to_string()))
}

/// Parse an `HH:MM:SS` clock time.
pub fn parse_clock(s: &str) -> ParseResult<Time> {
    Time::parse(s.trim(), CLOCK_FORMAT).map_err(|_| ParseError::InvalidTime(s.to_string()))
}

/// Parse a timestamp.
///
/// Accepts `T` or a space between date and time, with or without seconds.
pub fn parse_timestamp(s: &str) -> ParseResult<PrimitiveDateTime> {
    let trimmed = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(trimmed, format).ok())
        .ok_or_else(|| ParseError::InvalidTimestamp(s.to_string()))
}

/// Parse a duration in hours.
///
/// Rejects non-numeric, non-finite and negative values.
pub fn parse_hours(s: &str) -> ParseResult<f64> {
    let hours: f64 = s
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidHours(s.to_string()))?;
    if !hours.is_finite() || hours < 0.0 {
        return Err(ParseError::InvalidHours(s.to_string()));
    }
    Ok(hours)
}

/// Format a duration in hours in its shortest decimal form.
///
/// Whole numbers keep one decimal place (`8.0`) so the column reads as
/// numeric in spreadsheets.
#[must_use]
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{hours:.1}")
    } else {
        hours.to_string()
    }
}

/// Round a duration to two decimal places, ties to even.
#[must_use]
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round_ties_even() / 100.0
}

/// Strip sub-second precision from a clock time.
#[must_use]
pub fn whole_seconds(time: Time) -> Time {
    time - Duration::nanoseconds(i64::from(time.nanosecond()))
}

/// Serde adapter for `YYYY-MM-DD` dates.
#[cfg(feature = "serde")]
pub mod serde_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_date(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `HH:MM:SS` clock times.
#[cfg(feature = "serde")]
pub mod serde_clock {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Time;

    pub fn serialize<S: Serializer>(time: &Time, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_clock(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Time, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_clock(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `YYYY-MM-DDTHH:MM:SS` timestamps.
#[cfg(feature = "serde")]
pub mod serde_timestamp {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::PrimitiveDateTime;

    pub fn serialize<S: Serializer>(
        timestamp: &PrimitiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(*timestamp))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<PrimitiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_timestamp(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, time};

    #[test]
    fn test_format_date_pads_components() {
        assert_eq!(format_date(date!(2024 - 01 - 02)), "2024-01-02");
    }

    #[test]
    fn test_format_clock_drops_subseconds() {
        assert_eq!(format_clock(time!(6:30:00.999)), "06:30:00");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(datetime!(2024-01-01 23:00:00)),
            "2024-01-01T23:00:00"
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date("2024-01-02").unwrap(), date!(2024 - 01 - 02));
        assert!(matches!(
            parse_date("02/01/2024"),
            Err(ParseError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("23:00:00").unwrap(), time!(23:00:00));
        assert!(parse_clock("23:00").is_err());
        assert!(parse_clock("25:00:00").is_err());
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = datetime!(2024-01-01 23:00:00);
        assert_eq!(parse_timestamp("2024-01-01T23:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-01 23:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-01T23:00").unwrap(), expected);
        assert_eq!(parse_timestamp(" 2024-01-01 23:00 ").unwrap(), expected);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_hours("7.5").unwrap(), 7.5);
        assert_eq!(parse_hours(" 6 ").unwrap(), 6.0);
        assert!(parse_hours("seven").is_err());
        assert!(parse_hours("-1").is_err());
        assert!(parse_hours("NaN").is_err());
        assert!(parse_hours("inf").is_err());
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(7.5), "7.5");
        assert_eq!(format_hours(8.0), "8.0");
        assert_eq!(format_hours(6.25), "6.25");
        assert_eq!(format_hours(0.0), "0.0");
        assert_eq!(parse_hours(&format_hours(7.33)).unwrap(), 7.33);
    }

    #[test]
    fn test_round_hours() {
        assert_eq!(round_hours(7.5), 7.5);
        assert_eq!(round_hours(7.0 + 1.0 / 3.0), 7.33);
        assert_eq!(round_hours(5.0 / 60.0), 0.08);
    }

    #[test]
    fn test_round_hours_ties_to_even() {
        assert_eq!(round_hours(7.625), 7.62);
        assert_eq!(round_hours(0.125), 0.12);
        assert_eq!(round_hours(0.375), 0.38);
    }

    #[test]
    fn test_whole_seconds() {
        assert_eq!(whole_seconds(time!(6:30:15.123456)), time!(6:30:15));
        assert_eq!(whole_seconds(time!(0:00)), time!(0:00));
    }
}
