//! Reminder delivery boundary.
//!
//! The group mutator arms and cancels reminders through [`Notifier`]. Trigger
//! times are computed by [`reminders_for`]; a notifier decides what "now" is
//! and silently skips triggers already in the past.

use jiff::Zoned;
use log::{debug, info};

use crate::{error::Result, models::Occurrence};

pub mod queue;
pub mod reminder;


pub use queue::ReminderQueue;
pub use reminder::{Reminder, reminder_id, reminder_ids, reminders_for, trigger_time};

/// Arms and cancels reminders for occurrences.
pub trait Notifier: Send + Sync {
    /// Arms the occurrence's reminders per its notification options.
    fn schedule(&self, occurrence: &Occurrence) -> Result<()>;

    /// Removes any pending reminders of the occurrence.
    fn cancel(&self, occurrence_id: &str) -> Result<()>;
}

/// Notifier that only logs the reminders it would arm.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn schedule(&self, occurrence: &Occurrence) -> Result<()> {
        for reminder in reminders_for(occurrence, Zoned::now().datetime()) {
            info!("Reminder {} armed for {}", reminder.id, reminder.fire_at);
        }
        Ok(())
    }

    fn cancel(&self, occurrence_id: &str) -> Result<()> {
        debug!("Reminders cancelled for occurrence {occurrence_id}");
        Ok(())
    }
}

/// Forwards cancellations but never arms anything.
///
/// Used when reminders are switched off, so stale ones still get removed.
pub struct Muted<'a>(pub &'a dyn Notifier);

impl Notifier for Muted<'_> {
    fn schedule(&self, _occurrence: &Occurrence) -> Result<()> {
        Ok(())
    }

    fn cancel(&self, occurrence_id: &str) -> Result<()> {
        self.0.cancel(occurrence_id)
    }
}
