//! Reminder trigger computation.

use jiff::{ToSpan, civil::DateTime};
use serde::{Deserialize, Serialize};

use crate::models::{NotificationOption, Occurrence};

/// One armed reminder for one occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Stable identifier: `plan.<occurrence id>.<option>`
    pub id: String,
    pub occurrence_id: String,
    pub option: NotificationOption,
    pub fire_at: DateTime,
    pub title: String,
    pub body: String,
}

/// Identifier of the reminder for `option` on an occurrence.
pub fn reminder_id(occurrence_id: &str, option: NotificationOption) -> String {
    format!("plan.{occurrence_id}.{}", option.as_str())
}

/// Every identifier an occurrence's reminders could have.
pub fn reminder_ids(occurrence_id: &str) -> Vec<String> {
    NotificationOption::ALL
        .iter()
        .map(|option| reminder_id(occurrence_id, *option))
        .collect()
}

/// When the reminder for `option` fires.
pub fn trigger_time(occurrence: &Occurrence, option: NotificationOption) -> DateTime {
    let base = match option {
        NotificationOption::Start10 | NotificationOption::Start5 => occurrence.start_time,
        NotificationOption::EndTime => occurrence.end_time,
    };
    base.checked_add(option.offset_minutes().minutes())
        .unwrap_or(base)
}

/// Reminders to arm for `occurrence`, skipping triggers at or before `now`.
///
/// Completed occurrences get none.
pub fn reminders_for(occurrence: &Occurrence, now: DateTime) -> Vec<Reminder> {
    if occurrence.is_completed {
        return Vec::new();
    }
    occurrence
        .notification_options
        .iter()
        .filter_map(|option| {
            let fire_at = trigger_time(occurrence, *option);
            (fire_at > now).then(|| Reminder {
                id: reminder_id(&occurrence.id, *option),
                occurrence_id: occurrence.id.clone(),
                option: *option,
                fire_at,
                title: "Plan reminder".to_string(),
                body: body_text(&occurrence.title, *option),
            })
        })
        .collect()
}

fn body_text(title: &str, option: NotificationOption) -> String {
    match option {
        NotificationOption::Start10 => format!("\"{title}\" starts in 10 minutes."),
        NotificationOption::Start5 => format!("\"{title}\" starts in 5 minutes."),
        NotificationOption::EndTime => {
            format!("\"{title}\" has ended. Check it off if you finished it.")
        }
    }
}
