//! Creation, editing and deletion of repeat groups.
//!
//! A recurring plan is a set of independent occurrences sharing a group id.
//! [`GroupMutator`] is the only writer of group membership. It never deletes
//! or regenerates an occurrence dated before the `today` it is given; edits
//! and deletions only reach today-or-later occurrences.

use jiff::{Timestamp, civil::Date};
use log::{info, warn};
use serde::Serialize;

use crate::{
    error::{Result, SchedulerError},
    models::{EditFields, Occurrence, PlanTemplate, RepeatMode},
    notify::Notifier,
    recurrence,
    repository::PlanRepository,
};

/// What an edit did beyond updating the edited occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditOutcome {
    /// Only the edited occurrence changed; siblings were left alone
    Updated,
    /// The occurrence left its group and the group's future slice was removed
    Detached {
        group_id: String,
        removed: Vec<String>,
    },
    /// The group's future slice was rebuilt from the edited occurrence
    Regenerated {
        group_id: String,
        removed: Vec<String>,
        created: Vec<Occurrence>,
    },
}

fn new_group_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Applies group-aware changes through a repository and a notifier.
///
/// Calls against one group must be serialized by the caller.
pub struct GroupMutator<'a, R: PlanRepository + ?Sized> {
    repository: &'a mut R,
    notifier: &'a dyn Notifier,
}

impl<'a, R: PlanRepository + ?Sized> GroupMutator<'a, R> {
    pub fn new(repository: &'a mut R, notifier: &'a dyn Notifier) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Read access to the underlying repository.
    pub fn repository(&self) -> &R {
        self.repository
    }

    /// Creates one occurrence of `template` per day `rule` expands to from
    /// `anchor`. Recurring rules share a fresh group id.
    pub fn create(
        &mut self,
        template: &PlanTemplate,
        anchor: Date,
        rule: RepeatMode,
    ) -> Result<Vec<Occurrence>> {
        template.validate()?;

        let days = recurrence::expand(anchor, rule, None);
        let group_id = rule.is_recurring().then(new_group_id);
        let now = Timestamp::now();

        // Every stored occurrence is armed before the next create.
        let mut created = Vec::with_capacity(days.len());
        for day in days {
            let occurrence = template.instantiate(day, group_id.as_deref(), rule, now);
            let occurrence = self.repository.create(&occurrence).inspect_err(|e| {
                warn!(
                    "Creation of '{}' stopped after {} occurrence(s): {e}",
                    template.title,
                    created.len()
                )
            })?;
            self.arm(&occurrence);
            created.push(occurrence);
        }

        info!(
            "Created {} occurrence(s) of '{}' from {anchor} ({rule})",
            created.len(),
            template.title
        );
        Ok(created)
    }

    /// Edits one occurrence and propagates a repeat-mode change to its group.
    ///
    /// The edited occurrence is always persisted first. Then:
    /// - switching to [`RepeatMode::None`] detaches it and removes the
    ///   group's other occurrences dated `today` or later;
    /// - keeping the same mode within an existing group touches nothing else;
    /// - any other change rebuilds the group from
    ///   `max(today, occurrence day)` on, as one unit of work.
    ///
    /// # Errors
    ///
    /// Invalid fields are rejected before anything is written. A failure while
    /// rebuilding is reported as one `SchedulerError::Regeneration`; nothing is
    /// rolled back and the edit can be retried as a whole.
    pub fn edit_and_propagate(
        &mut self,
        occurrence: &mut Occurrence,
        fields: &EditFields,
        new_rule: RepeatMode,
        today: Date,
    ) -> Result<EditOutcome> {
        let previous_rule = occurrence.repeat_mode;
        let had_group = occurrence.group_id.is_some();
        let now = Timestamp::now();

        fields.apply(occurrence, now)?;
        occurrence.repeat_mode = new_rule;

        let regenerate = new_rule.is_recurring() && (new_rule != previous_rule || !had_group);
        let regen_group = regenerate.then(|| {
            occurrence
                .group_id
                .get_or_insert_with(new_group_id)
                .clone()
        });

        self.repository.update(occurrence)?;
        self.rearm(occurrence);

        if !new_rule.is_recurring() {
            return self.detach(occurrence, today);
        }

        let Some(group_id) = regen_group else {
            return Ok(EditOutcome::Updated);
        };
        self.regenerate(occurrence, group_id, today, now)
    }

    /// Loads an occurrence by ID and applies [`Self::edit_and_propagate`].
    pub fn edit_by_id(
        &mut self,
        id: &str,
        fields: &EditFields,
        new_rule: Option<RepeatMode>,
        today: Date,
    ) -> Result<(Occurrence, EditOutcome)> {
        let mut occurrence = self.require(id)?;
        let new_rule = new_rule.unwrap_or(occurrence.repeat_mode);
        let outcome = self.edit_and_propagate(&mut occurrence, fields, new_rule, today)?;
        Ok((occurrence, outcome))
    }

    fn detach(&mut self, occurrence: &mut Occurrence, today: Date) -> Result<EditOutcome> {
        let Some(group_id) = occurrence.group_id.clone() else {
            return Ok(EditOutcome::Updated);
        };

        let removed = self
            .repository
            .delete_in_group(&group_id, today, Some(&occurrence.id))?;
        for id in &removed {
            self.disarm(id);
        }

        occurrence.group_id = None;
        self.repository.update(occurrence)?;

        info!(
            "Detached {} from group {group_id}, removed {} future occurrence(s)",
            occurrence.id,
            removed.len()
        );
        Ok(EditOutcome::Detached { group_id, removed })
    }

    fn regenerate(
        &mut self,
        occurrence: &Occurrence,
        group_id: String,
        today: Date,
        now: Timestamp,
    ) -> Result<EditOutcome> {
        let own_day = occurrence.day();
        let floor = today.max(own_day);
        let template = PlanTemplate::from_occurrence(occurrence);

        let siblings: Vec<Occurrence> =
            recurrence::expand(own_day, occurrence.repeat_mode, Some(floor))
                .into_iter()
                .filter(|day| *day != own_day)
                .map(|day| {
                    template.instantiate(day, Some(&group_id), occurrence.repeat_mode, now)
                })
                .collect();

        let replacement =
            match self
                .repository
                .replace_in_group(&group_id, floor, Some(&occurrence.id), &siblings)
            {
                Ok(replacement) => replacement,
                Err(e) => {
                    warn!("Group {group_id} left partially regenerated: {e}");
                    for id in e.removed_before_failure() {
                        self.disarm(id);
                    }
                    return Err(e);
                }
            };

        for id in &replacement.removed {
            self.disarm(id);
        }
        for sibling in &replacement.created {
            self.arm(sibling);
        }

        info!(
            "Regenerated group {group_id} from {floor}: removed {}, created {}",
            replacement.removed.len(),
            replacement.created.len()
        );
        Ok(EditOutcome::Regenerated {
            group_id,
            removed: replacement.removed,
            created: replacement.created,
        })
    }

    /// Removes one occurrence and its reminders.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.repository.delete(id)?;
        self.disarm(id);
        Ok(())
    }

    /// Removes every occurrence of `group_id` dated `from` or later, except
    /// `excluding`, and cancels their reminders.
    pub fn delete_group_forward(
        &mut self,
        group_id: &str,
        from: Date,
        excluding: Option<&str>,
    ) -> Result<Vec<String>> {
        let removed = self.repository.delete_in_group(group_id, from, excluding)?;
        for id in &removed {
            self.disarm(id);
        }
        info!(
            "Deleted {} occurrence(s) of group {group_id} from {from}",
            removed.len()
        );
        Ok(removed)
    }

    /// Removes a whole series, past occurrences included.
    ///
    /// This is an explicit user action and is never reached from an edit.
    pub fn delete_group(&mut self, group_id: &str) -> Result<Vec<String>> {
        let removed = self.delete_group_forward(group_id, Date::MIN, None)?;
        if removed.is_empty() {
            return Err(SchedulerError::GroupNotFound {
                group_id: group_id.to_string(),
            });
        }
        Ok(removed)
    }

    /// Flips the completion flag of one occurrence.
    ///
    /// Completing drops its reminders; un-completing re-arms them.
    pub fn toggle_completion(&mut self, id: &str) -> Result<Occurrence> {
        let mut occurrence = self.require(id)?;
        occurrence.is_completed = !occurrence.is_completed;
        occurrence.updated_at = Timestamp::now();

        let occurrence = self.repository.update(&occurrence)?;
        self.rearm(&occurrence);
        Ok(occurrence)
    }

    fn require(&self, id: &str) -> Result<Occurrence> {
        self.repository
            .get(id)?
            .ok_or_else(|| SchedulerError::OccurrenceNotFound { id: id.to_string() })
    }

    // Reminder failures never undo repository work; they are logged.

    fn arm(&self, occurrence: &Occurrence) {
        if let Err(e) = self.notifier.schedule(occurrence) {
            warn!("Failed to schedule reminders for {}: {e}", occurrence.id);
        }
    }

    fn disarm(&self, id: &str) {
        if let Err(e) = self.notifier.cancel(id) {
            warn!("Failed to cancel reminders for {id}: {e}");
        }
    }

    fn rearm(&self, occurrence: &Occurrence) {
        self.disarm(&occurrence.id);
        if !occurrence.is_completed {
            self.arm(occurrence);
        }
    }
}
