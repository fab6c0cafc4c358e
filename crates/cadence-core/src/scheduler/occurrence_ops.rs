//! Occurrence and group operations for the Scheduler.

use serde::Serialize;

use super::{EditOutcome, Scheduler};
use crate::{
    conflict,
    error::{Result, SchedulerError},
    models::{MinuteOfDay, Occurrence},
    params::{CheckSlot, ClampDrag, CreatePlan, DeleteGroup, EditPlan, Id, ListPlans},
    repository::{DateRange, PlanRepository},
};

/// The edited occurrence together with what happened to its group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditResult {
    pub occurrence: Occurrence,
    pub outcome: EditOutcome,
}

/// Whether a time block is free on a day, and what it collides with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotCheck {
    pub free: bool,
    pub conflicts: Vec<Occurrence>,
}

impl Scheduler {
    /// Creates a plan on `params.day`, expanded into a repeat group when the
    /// repeat mode asks for one.
    ///
    /// Returns every occurrence created, earliest first.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Vec<Occurrence>> {
        let params = params.clone();
        self.with_mutator(move |mutator| {
            mutator.create(&params.template, params.day, params.repeat)
        })
        .await
    }

    /// Edits one occurrence and propagates repeat-mode changes to its group.
    pub async fn edit_plan(&self, params: &EditPlan) -> Result<EditResult> {
        let params = params.clone();
        self.with_mutator(move |mutator| {
            let (occurrence, outcome) =
                mutator.edit_by_id(&params.id, &params.fields, params.repeat, params.today)?;
            Ok(EditResult {
                occurrence,
                outcome,
            })
        })
        .await
    }

    /// Deletes a single occurrence.
    pub async fn delete_plan(&self, params: &Id) -> Result<()> {
        let id = params.id.clone();
        self.with_mutator(move |mutator| mutator.delete(&id)).await
    }

    /// Deletes a repeat group from a day on, or the whole series.
    ///
    /// Returns the IDs of the removed occurrences.
    pub async fn delete_group(&self, params: &DeleteGroup) -> Result<Vec<String>> {
        let params = params.clone();
        self.with_mutator(move |mutator| match params.from {
            Some(from) => {
                mutator.delete_group_forward(&params.group_id, from, params.excluding.as_deref())
            }
            None => mutator.delete_group(&params.group_id),
        })
        .await
    }

    /// Flips an occurrence between done and not done.
    pub async fn toggle_completion(&self, params: &Id) -> Result<Occurrence> {
        let id = params.id.clone();
        self.with_mutator(move |mutator| mutator.toggle_completion(&id))
            .await
    }

    /// Retrieves an occurrence by its ID.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<Occurrence>> {
        let id = params.id.clone();
        self.with_database(move |db| db.get(&id)).await
    }

    /// Every occurrence of a repeat group, past ones included.
    pub async fn group_members(&self, group_id: &str) -> Result<Vec<Occurrence>> {
        let group_id = group_id.to_string();
        self.with_database(move |db| db.fetch_group(&group_id))
            .await
    }

    /// Lists occurrences over a range of days, ordered by start time.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<Vec<Occurrence>> {
        let from = params.from;
        let to = params.to.unwrap_or(from);
        if to < from {
            return Err(SchedulerError::invalid_input("to")
                .with_reason(format!("Range end {to} is before its start {from}")));
        }
        self.with_database(move |db| db.fetch(DateRange::new(from, to)))
            .await
    }

    /// Tests a time block against the other occurrences of its day.
    pub async fn check_slot(&self, params: &CheckSlot) -> Result<SlotCheck> {
        let params = params.clone();
        self.with_database(move |db| {
            let day = db.fetch_day(params.day)?;
            let conflicts: Vec<Occurrence> = day
                .into_iter()
                .filter(|occurrence| Some(occurrence.id.as_str()) != params.excluding.as_deref())
                .filter(|occurrence| conflict::overlaps(&params.interval, &occurrence.interval()))
                .collect();
            Ok(SlotCheck {
                free: conflicts.is_empty(),
                conflicts,
            })
        })
        .await
    }

    /// Clamps a drag on a day's timeline against that day's occurrences.
    pub async fn clamp_drag(&self, params: &ClampDrag) -> Result<MinuteOfDay> {
        let params = params.clone();
        self.with_database(move |db| {
            let day = db.fetch_day(params.day)?;
            let busy = conflict::busy_intervals(&day, params.excluding.as_deref());
            Ok(conflict::clamp_cursor(params.anchor, params.cursor, &busy))
        })
        .await
    }
}
