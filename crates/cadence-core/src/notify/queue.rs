//! In-process reminder queue.

use std::{
    collections::BTreeMap,
    sync::{Mutex, PoisonError},
};

use jiff::{Zoned, civil::DateTime};

use super::{
    Notifier,
    reminder::{Reminder, reminder_ids, reminders_for},
};
use crate::{error::Result, models::Occurrence};

/// Keeps armed reminders in memory until they are taken for delivery.
#[derive(Debug, Default)]
pub struct ReminderQueue {
    fixed_now: Option<DateTime>,
    pending: Mutex<BTreeMap<String, Reminder>>,
}

impl ReminderQueue {
    /// Queue that compares triggers against the system's local time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue that treats `now` as the current time.
    pub fn with_now(now: DateTime) -> Self {
        Self {
            fixed_now: Some(now),
            pending: Mutex::default(),
        }
    }

    fn now(&self) -> DateTime {
        self.fixed_now
            .unwrap_or_else(|| Zoned::now().datetime())
    }

    /// Armed reminders ordered by firing time.
    pub fn pending(&self) -> Vec<Reminder> {
        let pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let mut reminders: Vec<Reminder> = pending.values().cloned().collect();
        reminders.sort_by(|a, b| a.fire_at.cmp(&b.fire_at).then_with(|| a.id.cmp(&b.id)));
        reminders
    }

    /// Armed reminders for one occurrence.
    pub fn pending_for(&self, occurrence_id: &str) -> Vec<Reminder> {
        self.pending()
            .into_iter()
            .filter(|reminder| reminder.occurrence_id == occurrence_id)
            .collect()
    }

    /// Removes and returns every reminder due at or before `until`.
    pub fn take_due(&self, until: DateTime) -> Vec<Reminder> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let due: Vec<String> = pending
            .values()
            .filter(|reminder| reminder.fire_at <= until)
            .map(|reminder| reminder.id.clone())
            .collect();
        let mut taken: Vec<Reminder> = due.iter().filter_map(|id| pending.remove(id)).collect();
        taken.sort_by(|a, b| a.fire_at.cmp(&b.fire_at));
        taken
    }
}

impl Notifier for ReminderQueue {
    fn schedule(&self, occurrence: &Occurrence) -> Result<()> {
        let reminders = reminders_for(occurrence, self.now());
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        for reminder in reminders {
            pending.insert(reminder.id.clone(), reminder);
        }
        Ok(())
    }

    fn cancel(&self, occurrence_id: &str) -> Result<()> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        for id in reminder_ids(occurrence_id) {
            pending.remove(&id);
        }
        Ok(())
    }
}
