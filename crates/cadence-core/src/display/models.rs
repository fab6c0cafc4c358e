//! Display implementations for domain models.
//!
//! Occurrences render as markdown: a heading with the checkbox, time block
//! and title, followed by a metadata list and the note as a paragraph.

use std::fmt;

use super::datetime::{DayHeading, LocalDateTime};
use crate::models::{Occurrence, format_options};

impl Occurrence {
    /// One-line form used inside lists.
    pub(crate) fn fmt_line(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.is_completed { "x" } else { " " };
        write!(f, "- [{check}] {} {}", self.interval(), self.title)?;
        if self.repeat_mode.is_recurring() {
            write!(f, " ({})", self.repeat_mode)?;
        }
        writeln!(f, " `{}`", self.id)
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.is_completed { "x" } else { " " };
        writeln!(f, "### [{check}] {} {}", self.interval(), self.title)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Day: {}", DayHeading(self.day()))?;
        writeln!(f, "- Color: {}", self.color)?;
        match &self.group_id {
            Some(group_id) => writeln!(f, "- Repeat: {} (group {group_id})", self.repeat_mode)?,
            None => writeln!(f, "- Repeat: {}", self.repeat_mode)?,
        }
        if self.notification_options.is_empty() {
            writeln!(f, "- Reminders: none")?;
        } else {
            writeln!(
                f,
                "- Reminders: {}",
                format_options(&self.notification_options).replace(',', ", ")
            )?;
        }
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(note) = &self.note {
            writeln!(f)?;
            writeln!(f, "{note}")?;
        }

        Ok(())
    }
}
