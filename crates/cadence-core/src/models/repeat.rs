//! Repeat modes for recurring plans.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// How a plan recurs from its anchor day.
///
/// The `*InCurrent*` modes repeat **daily** until the end of the anchor's
/// week or month. They do not step by a week or a month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// Single occurrence
    #[default]
    None,

    /// Every day until the end of the anchor's year
    Daily,

    /// Monday through Friday until the end of the anchor's year
    Weekdays,

    /// Same weekday every week until the end of the anchor's year
    Weekly,

    /// Same day of month until the end of the anchor's year
    Monthly,

    /// Every day until the Sunday of the anchor's week
    WeeklyInCurrentWeek,

    /// Every day until the last day of the anchor's month
    MonthlyInCurrentMonth,
}

impl RepeatMode {
    /// All modes in menu order.
    pub const ALL: [RepeatMode; 7] = [
        RepeatMode::None,
        RepeatMode::Daily,
        RepeatMode::Weekdays,
        RepeatMode::Weekly,
        RepeatMode::Monthly,
        RepeatMode::WeeklyInCurrentWeek,
        RepeatMode::MonthlyInCurrentMonth,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatMode::None => "none",
            RepeatMode::Daily => "daily",
            RepeatMode::Weekdays => "weekdays",
            RepeatMode::Weekly => "weekly",
            RepeatMode::Monthly => "monthly",
            RepeatMode::WeeklyInCurrentWeek => "weekly_in_current_week",
            RepeatMode::MonthlyInCurrentMonth => "monthly_in_current_month",
        }
    }

    /// Whether occurrences created with this mode share a group.
    pub fn is_recurring(&self) -> bool {
        !matches!(self, RepeatMode::None)
    }
}

impl FromStr for RepeatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "none" => Ok(RepeatMode::None),
            "daily" => Ok(RepeatMode::Daily),
            "weekdays" => Ok(RepeatMode::Weekdays),
            "weekly" => Ok(RepeatMode::Weekly),
            "monthly" => Ok(RepeatMode::Monthly),
            "weekly_in_current_week" | "weeklyincurrentweek" => {
                Ok(RepeatMode::WeeklyInCurrentWeek)
            }
            "monthly_in_current_month" | "monthlyincurrentmonth" => {
                Ok(RepeatMode::MonthlyInCurrentMonth)
            }
            _ => Err(format!("Invalid repeat mode: {s}")),
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
