//! Reminder options attached to plans.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// When a reminder fires relative to its occurrence.
///
/// Variants are declared in firing order, which is also the order option
/// sets are kept in.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum NotificationOption {
    /// Ten minutes before the start time
    #[serde(rename = "start_10")]
    Start10,

    /// Five minutes before the start time
    #[serde(rename = "start_5")]
    Start5,

    /// At the end time
    #[serde(rename = "end_time")]
    EndTime,
}

impl NotificationOption {
    /// Every option, in firing order.
    pub const ALL: [NotificationOption; 3] = [
        NotificationOption::Start10,
        NotificationOption::Start5,
        NotificationOption::EndTime,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationOption::Start10 => "start_10",
            NotificationOption::Start5 => "start_5",
            NotificationOption::EndTime => "end_time",
        }
    }

    /// Offset in minutes from the anchoring time (start or end).
    pub fn offset_minutes(&self) -> i64 {
        match self {
            NotificationOption::Start10 => -10,
            NotificationOption::Start5 => -5,
            NotificationOption::EndTime => 0,
        }
    }
}

impl FromStr for NotificationOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "start_10" => Ok(NotificationOption::Start10),
            "start_5" => Ok(NotificationOption::Start5),
            "end_time" => Ok(NotificationOption::EndTime),
            _ => Err(format!("Invalid notification option: {s}")),
        }
    }
}

impl fmt::Display for NotificationOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deduplicates and sorts an option set into firing order.
pub fn normalize_options(options: impl IntoIterator<Item = NotificationOption>) -> Vec<NotificationOption> {
    let mut options: Vec<_> = options.into_iter().collect();
    options.sort();
    options.dedup();
    options
}

/// Parses the stored comma-separated form of an option set.
///
/// A missing value means the plan predates the column and gets the default
/// end-time reminder. An empty string is an explicit empty set. Unknown tokens
/// are dropped; if none of the tokens are valid the default applies.
pub fn parse_options(raw: Option<&str>) -> Vec<NotificationOption> {
    let Some(raw) = raw else {
        return vec![NotificationOption::EndTime];
    };
    if raw.is_empty() {
        return Vec::new();
    }
    let options = normalize_options(raw.split(',').filter_map(|token| token.parse().ok()));
    if options.is_empty() {
        vec![NotificationOption::EndTime]
    } else {
        options
    }
}

/// Renders an option set in its stored comma-separated form.
pub fn format_options(options: &[NotificationOption]) -> String {
    options
        .iter()
        .map(NotificationOption::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
