//! Date arithmetic and parsing shared by the calendar services.
//!
//! All dates here are timezone-naive: the booking backend exchanges plain
//! `YYYY-MM-DD` dates and `YYYY-MM-DDTHH:MM[:SS]` date-times, and the grid is
//! laid out in the doctor's local calendar.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::errors::{CalendarError, RecordError};

const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| RecordError::MalformedDate(value.to_string()))
}

/// Parse a combined `YYYY-MM-DDTHH:MM[:SS[.fff]]` date-time (a space separator is accepted too)
pub fn parse_date_time(value: &str) -> Result<NaiveDateTime, RecordError> {
    let trimmed = value.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| RecordError::MalformedDateTime(value.to_string()))
}

/// Parse a slot start time (`HH:MM`); seconds are tolerated and dropped
pub fn parse_slot_time(value: &str) -> Result<NaiveTime, RecordError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .ok()
        .and_then(|time| time.with_second(0))
        .ok_or_else(|| RecordError::MalformedTime(value.to_string()))
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Weekday offset of a date, 0 = Sunday .. 6 = Saturday
pub fn weekday_offset(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(weekday_offset(date)))
}

/// Shift a date by whole calendar months.
///
/// The day of month is clamped to the last valid day of the target month, so
/// 2024-01-31 + 1 month is 2024-02-29 and 2023-03-31 - 1 month is 2023-02-28.
pub fn add_months_clamped(date: NaiveDate, months: i32) -> Result<NaiveDate, CalendarError> {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };

    shifted.ok_or_else(|| {
        CalendarError::InvalidArgument(format!("{} shifted by {} months is out of range", date, months))
    })
}

/// Shift a date by whole days
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, CalendarError> {
    date.checked_add_signed(Duration::days(days)).ok_or_else(|| {
        CalendarError::InvalidArgument(format!("{} shifted by {} days is out of range", date, days))
    })
}

/// Get the human-readable name for a month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Invalid Month",
    }
}

/// "March 2024"
pub fn month_title(year: i32, month: u32) -> String {
    format!("{} {}", month_name(month), year)
}

/// "March 15, 2024"
pub fn format_long_date(date: NaiveDate) -> String {
    format!("{} {}, {}", month_name(date.month()), date.day(), date.year())
}

/// "HH:MM"
pub fn format_hour_minute(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
