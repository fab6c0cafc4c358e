//! Expansion of a repeat mode into concrete occurrence days.
//!
//! Expansion is bounded: yearly-horizon modes stop at December 31 of the
//! anchor's year, and the `*InCurrent*` modes stop at the end of the anchor's
//! week or month. Nothing here reads a clock.

use jiff::{ToSpan, civil::Date};
use log::debug;

use crate::{calendar, models::RepeatMode};

/// Last day (inclusive) that `rule` may produce for `anchor`.
pub fn horizon(anchor: Date, rule: RepeatMode) -> Date {
    match rule {
        RepeatMode::None => anchor,
        RepeatMode::Daily | RepeatMode::Weekdays | RepeatMode::Weekly | RepeatMode::Monthly => {
            calendar::end_of_year(anchor)
        }
        RepeatMode::WeeklyInCurrentWeek => calendar::end_of_week(anchor),
        RepeatMode::MonthlyInCurrentMonth => calendar::end_of_month(anchor),
    }
}

/// Expands `rule` anchored at `anchor` into ascending, distinct days.
///
/// With a `floor`, days before it are left out; the cadence itself is still
/// anchored at `anchor`.
pub fn expand(anchor: Date, rule: RepeatMode, floor: Option<Date>) -> Vec<Date> {
    let end = horizon(anchor, rule);
    let days = match rule {
        RepeatMode::None => vec![anchor],
        RepeatMode::Daily
        | RepeatMode::WeeklyInCurrentWeek
        | RepeatMode::MonthlyInCurrentMonth => stride(anchor, end, 1, |_| true),
        RepeatMode::Weekdays => stride(anchor, end, 1, calendar::is_weekday),
        RepeatMode::Weekly => stride(anchor, end, 7, |_| true),
        RepeatMode::Monthly => same_day_each_month(anchor, end),
    };

    let days: Vec<Date> = match floor {
        Some(floor) => days.into_iter().filter(|day| *day >= floor).collect(),
        None => days,
    };
    debug!(
        "Expanded {rule} from {anchor} to {} day(s) (horizon {end})",
        days.len()
    );
    days
}

/// Every `step`-th day from `start` through `end` that passes `include`.
fn stride(start: Date, end: Date, step: i64, include: impl Fn(Date) -> bool) -> Vec<Date> {
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        if include(current) {
            days.push(current);
        }
        let Ok(next) = current.checked_add(step.days()) else {
            break;
        };
        current = next;
    }
    days
}

/// `anchor` advanced month by month through `end`, keeping only months that
/// have the anchor's day of month. Short months are skipped, not shifted.
fn same_day_each_month(anchor: Date, end: Date) -> Vec<Date> {
    let mut days = Vec::new();
    for offset in 0_i64.. {
        let Some(candidate) = calendar::add_months(anchor, offset) else {
            break;
        };
        if candidate > end {
            break;
        }
        if candidate.day() == anchor.day() {
            days.push(candidate);
        }
    }
    days
}
