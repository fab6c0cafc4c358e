//! Day, week and month arithmetic on civil dates.
//!
//! Every helper here works on [`jiff::civil`] values and never consults a
//! locale or the system calendar: weeks always start on Monday and month
//! arithmetic preserves the day of month where the target month has it,
//! falling back to the month's last day otherwise.
//!
//! Arithmetic that would leave jiff's supported range (`-9999-01-01` to
//! `9999-12-31`) saturates at the boundary instead of failing.

use jiff::{
    ToSpan,
    civil::{Date, DateTime, Weekday},
};

/// Calendar day of a civil date-time.
pub fn start_of_day(at: DateTime) -> Date {
    at.date()
}

/// `day` shifted by `days`, saturating at the supported range.
pub fn add_days(day: Date, days: i64) -> Date {
    day.checked_add(days.days()).unwrap_or(if days < 0 {
        Date::MIN
    } else {
        Date::MAX
    })
}

/// `day` shifted by `months`.
///
/// The day of month is kept when the target month has it; otherwise the
/// result is the target month's last day (2024-01-31 plus one month is
/// 2024-02-29). Returns `None` when the result leaves the supported range.
pub fn add_months(day: Date, months: i64) -> Option<Date> {
    day.checked_add(months.months()).ok()
}

/// The following day, or `None` at the end of the supported range.
pub fn next_day(day: Date) -> Option<Date> {
    day.tomorrow().ok()
}

/// Monday of the ISO-style week containing `day`.
pub fn start_of_week(day: Date) -> Date {
    let offset = i64::from(day.weekday().to_monday_zero_offset());
    add_days(day, -offset)
}

/// Sunday of the ISO-style week containing `day`.
pub fn end_of_week(day: Date) -> Date {
    add_days(start_of_week(day), 6)
}

/// First day of the month containing `day`.
pub fn start_of_month(day: Date) -> Date {
    day.first_of_month()
}

/// Last day of the month containing `day`.
pub fn end_of_month(day: Date) -> Date {
    day.last_of_month()
}

/// December 31 of the year containing `day`.
pub fn end_of_year(day: Date) -> Date {
    day.last_of_year()
}

/// Whether `day` falls on Monday through Friday.
pub fn is_weekday(day: Date) -> bool {
    !matches!(day.weekday(), Weekday::Saturday | Weekday::Sunday)
}
