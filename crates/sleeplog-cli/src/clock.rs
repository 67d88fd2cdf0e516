//! Local wall-clock time.
//!
//! The tracker core never reads the clock; the adapters call [`local_now`]
//! and pass the result in.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDateTime, Timelike};
use time::{Date, Month, PrimitiveDateTime, Time};

/// Current local wall-clock time, without an offset.
pub fn local_now() -> Result<PrimitiveDateTime> {
    from_naive(chrono::Local::now().naive_local())
}

/// Convert a chrono naive timestamp into a `time` one.
pub fn from_naive(naive: NaiveDateTime) -> Result<PrimitiveDateTime> {
    let month = u8::try_from(naive.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .context("Invalid month in local time")?;
    let day = u8::try_from(naive.day()).context("Invalid day in local time")?;
    let date = Date::from_calendar_date(naive.year(), month, day)
        .context("Local date out of range")?;

    // chrono encodes leap seconds as nanosecond values past 999_999_999.
    let nanos = naive.nanosecond().min(999_999_999);
    let time = Time::from_hms_nano(
        u8::try_from(naive.hour()).context("Invalid hour in local time")?,
        u8::try_from(naive.minute()).context("Invalid minute in local time")?,
        u8::try_from(naive.second()).context("Invalid second in local time")?,
        nanos,
    )
    .context("Invalid local time")?;

    Ok(PrimitiveDateTime::new(date, time))
}
