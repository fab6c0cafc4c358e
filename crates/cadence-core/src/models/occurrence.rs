//! Occurrence model definition and related functionality.

use jiff::{
    Timestamp,
    civil::{Date, DateTime},
};
use serde::{Deserialize, Serialize};

use super::{MinuteInterval, MinuteOfDay, NotificationOption, PlanColor, RepeatMode};

/// One concrete scheduled block on one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Occurrence {
    /// Unique identifier, stable for the occurrence's lifetime
    pub id: String,

    /// Shared by every occurrence generated from one recurring definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    /// Title of the plan
    pub title: String,

    /// Free-form note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Color tag
    pub color: PlanColor,

    /// Reminder options, deduplicated and in firing order
    #[serde(default)]
    pub notification_options: Vec<NotificationOption>,

    /// Start of the block
    pub start_time: DateTime,

    /// End of the block; same day as the start, or the next day's midnight
    pub end_time: DateTime,

    /// Repeat mode this occurrence was created or last edited with
    pub repeat_mode: RepeatMode,

    /// Completion flag, toggled per occurrence
    #[serde(default)]
    pub is_completed: bool,

    /// Timestamp when the occurrence was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the occurrence was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Occurrence {
    /// Calendar day the occurrence belongs to.
    pub fn day(&self) -> Date {
        self.start_time.date()
    }

    /// The occurrence's slot on its day's timeline.
    ///
    /// The result may be empty if the stored times were malformed.
    pub fn interval(&self) -> MinuteInterval {
        MinuteInterval::spanning(
            MinuteOfDay::of(self.start_time.time()),
            MinuteOfDay::end_of(self.start_time, self.end_time),
        )
    }

    /// Whether this occurrence lies strictly before `today`.
    pub fn is_past(&self, today: Date) -> bool {
        self.day() < today
    }
}
