//! Minute-of-day positions and same-day intervals.

use std::{fmt, str::FromStr};

use jiff::{
    ToSpan,
    civil::{Date, DateTime, Time},
};
use serde::{Deserialize, Serialize};

/// A position on a single day's timeline, in whole minutes since midnight.
///
/// Valid values are `0..=1440`. `1440` is only meaningful as an end value: it
/// marks a plan that runs until the following midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Start of the day
    pub const MIDNIGHT: MinuteOfDay = MinuteOfDay(0);
    /// The end-exclusive midnight marker
    pub const END_OF_DAY: MinuteOfDay = MinuteOfDay(1440);

    /// Returns `None` for values past [`MinuteOfDay::END_OF_DAY`].
    pub fn new(minutes: u16) -> Option<Self> {
        (minutes <= Self::END_OF_DAY.0).then_some(Self(minutes))
    }

    /// Builds a minute from an hour and minute pair; `24:00` is accepted.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        Self::new(hour.checked_mul(60)?.checked_add(minute)?)
    }

    /// Minute-of-day of a wall-clock time. Seconds are dropped.
    pub fn of(time: Time) -> Self {
        Self(time.hour() as u16 * 60 + time.minute() as u16)
    }

    /// End minute of a block that starts at `start` and ends at `end`.
    ///
    /// An end exactly at a later day's midnight maps to `1440` so the block
    /// reads as running to the end of its start day.
    pub fn end_of(start: DateTime, end: DateTime) -> Self {
        let minute = Self::of(end.time());
        if end.date() > start.date() && minute == Self::MIDNIGHT {
            Self::END_OF_DAY
        } else {
            minute
        }
    }

    /// Raw minute count.
    pub fn get(self) -> u16 {
        self.0
    }

    /// Civil date-time of this minute on `day`.
    ///
    /// `1440` yields the next day's midnight. Saturates at the end of the
    /// supported range.
    pub fn at_on(self, day: Date) -> DateTime {
        day.to_datetime(Time::midnight())
            .checked_add(i64::from(self.0).minutes())
            .unwrap_or(DateTime::MAX)
    }
}

impl FromStr for MinuteOfDay {
    type Err = String;

    /// Parses `HH:MM`, including `24:00`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("Invalid time '{s}': expected HH:MM"))?;
        let hour: u16 = hour
            .parse()
            .map_err(|_| format!("Invalid hour in '{s}'"))?;
        let minute: u16 = minute
            .parse()
            .map_err(|_| format!("Invalid minute in '{s}'"))?;
        Self::from_hm(hour, minute).ok_or_else(|| format!("Time '{s}' is outside 00:00-24:00"))
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// A half-open `[start, end)` range of minutes on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MinuteInterval {
    pub start: MinuteOfDay,
    pub end: MinuteOfDay,
}

impl MinuteInterval {
    /// Returns `None` unless `start < end`.
    pub fn new(start: MinuteOfDay, end: MinuteOfDay) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// The range between two points in either order. May be empty.
    pub fn spanning(a: MinuteOfDay, b: MinuteOfDay) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Whether the interval covers no time at all.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Length in minutes.
    pub fn duration_minutes(&self) -> u16 {
        self.end.get().saturating_sub(self.start.get())
    }

    /// Whether `minute` lies in `[start, end)`.
    pub fn contains(&self, minute: MinuteOfDay) -> bool {
        self.start <= minute && minute < self.end
    }
}

impl fmt::Display for MinuteInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
