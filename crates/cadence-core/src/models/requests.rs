//! Request types for creating and editing occurrences.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use super::{
    MinuteInterval, MinuteOfDay, NotificationOption, Occurrence, PlanColor, RepeatMode,
    normalize_options,
};
use crate::error::{Result, SchedulerError};

/// The fields copied to every occurrence of a plan at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanTemplate {
    pub title: String,
    pub note: Option<String>,
    pub color: PlanColor,
    pub notification_options: Vec<NotificationOption>,
    /// Time of day the block starts
    pub start: MinuteOfDay,
    /// Time of day the block ends; `24:00` runs to midnight
    pub end: MinuteOfDay,
}

impl PlanTemplate {
    /// Captures an existing occurrence's fields and time of day.
    pub fn from_occurrence(occurrence: &Occurrence) -> Self {
        let interval = occurrence.interval();
        Self {
            title: occurrence.title.clone(),
            note: occurrence.note.clone(),
            color: occurrence.color,
            notification_options: occurrence.notification_options.clone(),
            start: interval.start,
            end: interval.end,
        }
    }

    /// Rejects an empty title or a block that does not end after it starts.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(SchedulerError::invalid_input("title").with_reason("Title cannot be empty"));
        }
        if MinuteInterval::new(self.start, self.end).is_none() {
            return Err(SchedulerError::invalid_input("end")
                .with_reason(format!("End {} must be after start {}", self.end, self.start)));
        }
        Ok(())
    }

    /// Builds a fresh, incomplete occurrence of this template on `day`.
    pub fn instantiate(
        &self,
        day: Date,
        group_id: Option<&str>,
        repeat_mode: RepeatMode,
        now: Timestamp,
    ) -> Occurrence {
        Occurrence {
            id: uuid::Uuid::new_v4().to_string(),
            group_id: group_id.map(String::from),
            title: self.title.clone(),
            note: self.note.clone(),
            color: self.color,
            notification_options: normalize_options(self.notification_options.iter().copied()),
            start_time: self.start.at_on(day),
            end_time: self.end.at_on(day),
            repeat_mode,
            is_completed: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Field changes applied to one occurrence by an edit.
///
/// `None` leaves a field as it is. An empty `note` clears the note.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EditFields {
    pub title: Option<String>,
    pub note: Option<String>,
    pub color: Option<PlanColor>,
    pub notification_options: Option<Vec<NotificationOption>>,
    pub start: Option<MinuteOfDay>,
    pub end: Option<MinuteOfDay>,
}

impl EditFields {
    /// Applies the changes to `occurrence`, keeping it on its current day.
    ///
    /// Nothing is modified when validation fails.
    pub fn apply(&self, occurrence: &mut Occurrence, now: Timestamp) -> Result<()> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err(SchedulerError::invalid_input("title").with_reason("Title cannot be empty"));
        }

        let current = occurrence.interval();
        let start = self.start.unwrap_or(current.start);
        let end = self.end.unwrap_or(current.end);
        if MinuteInterval::new(start, end).is_none() {
            return Err(SchedulerError::invalid_input("end")
                .with_reason(format!("End {end} must be after start {start}")));
        }

        let day = occurrence.day();
        if let Some(title) = &self.title {
            occurrence.title = title.clone();
        }
        if let Some(note) = &self.note {
            occurrence.note = (!note.is_empty()).then(|| note.clone());
        }
        if let Some(color) = self.color {
            occurrence.color = color;
        }
        if let Some(options) = &self.notification_options {
            occurrence.notification_options = normalize_options(options.iter().copied());
        }
        occurrence.start_time = start.at_on(day);
        occurrence.end_time = end.at_on(day);
        occurrence.updated_at = now;
        Ok(())
    }
}
