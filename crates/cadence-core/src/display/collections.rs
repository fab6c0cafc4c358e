//! Collection wrapper types for displaying groups of occurrences.

use std::{fmt, ops::Index};

use super::datetime::DayHeading;
use crate::models::Occurrence;

/// Occurrences laid out day by day, one heading per day.
///
/// Expects its contents ordered by start time, as the repository returns
/// them.
///
/// # Examples
///
/// ```rust
/// use cadence_core::{display::Agenda, models::PlanTemplate, RepeatMode};
/// use jiff::{Timestamp, civil::date};
///
/// let template = PlanTemplate {
///     title: "Standup".to_string(),
///     note: None,
///     color: Default::default(),
///     notification_options: vec![],
///     start: "09:00".parse().unwrap(),
///     end: "09:15".parse().unwrap(),
/// };
/// let occurrence = template.instantiate(date(2024, 3, 4), None, RepeatMode::None, Timestamp::now());
///
/// let output = Agenda(vec![occurrence]).to_string();
/// assert!(output.contains("## 2024-03-04 (Mon)"));
/// assert!(output.contains("09:00-09:15 Standup"));
/// ```
pub struct Agenda(pub Vec<Occurrence>);

impl Agenda {
    /// Check if the agenda is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of occurrences in the agenda.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the occurrences.
    pub fn iter(&self) -> std::slice::Iter<'_, Occurrence> {
        self.0.iter()
    }
}

impl Index<usize> for Agenda {
    type Output = Occurrence;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Agenda {
    type Item = Occurrence;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Agenda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans scheduled.");
        }

        let mut current_day = None;
        for occurrence in &self.0 {
            let day = occurrence.day();
            if current_day != Some(day) {
                if current_day.is_some() {
                    writeln!(f)?;
                }
                writeln!(f, "## {}", DayHeading(day))?;
                writeln!(f)?;
                current_day = Some(day);
            }
            occurrence.fmt_line(f)?;
        }
        Ok(())
    }
}
