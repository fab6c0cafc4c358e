//! The storage boundary for occurrences.
//!
//! [`PlanRepository`] is what the group mutator talks to. The SQLite
//! [`crate::Database`] is the production implementation; tests may use any
//! in-memory store.

use jiff::civil::Date;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    error::{RegenerationStep, Result, SchedulerError},
    models::Occurrence,
};

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Date,
    pub to: Date,
}

impl DateRange {
    /// Range covering the days from `from` through `to`.
    pub fn new(from: Date, to: Date) -> Self {
        Self { from, to }
    }

    /// Range covering exactly one day.
    pub fn day(day: Date) -> Self {
        Self { from: day, to: day }
    }

    /// Whether `day` falls in the range.
    pub fn contains(&self, day: Date) -> bool {
        self.from <= day && day <= self.to
    }
}

/// Outcome of replacing the future slice of a repeat group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Replacement {
    /// IDs of the occurrences that were removed
    pub removed: Vec<String>,
    /// Occurrences that were persisted in their place
    pub created: Vec<Occurrence>,
}

/// Persistent storage of occurrences.
pub trait PlanRepository {
    /// Occurrences whose day lies in `range`, ordered by start time.
    fn fetch(&self, range: DateRange) -> Result<Vec<Occurrence>>;

    /// A single occurrence by ID.
    fn get(&self, id: &str) -> Result<Option<Occurrence>>;

    /// Persists a new occurrence.
    fn create(&mut self, occurrence: &Occurrence) -> Result<Occurrence>;

    /// Overwrites a stored occurrence.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::OccurrenceNotFound` if no occurrence has the ID.
    fn update(&mut self, occurrence: &Occurrence) -> Result<Occurrence>;

    /// Removes a stored occurrence.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::OccurrenceNotFound` if no occurrence has the ID.
    fn delete(&mut self, id: &str) -> Result<()>;

    /// Removes every occurrence of `group_id` dated `from` or later, except
    /// `excluding`. Returns the removed IDs.
    fn delete_in_group(
        &mut self,
        group_id: &str,
        from: Date,
        excluding: Option<&str>,
    ) -> Result<Vec<String>>;

    /// Occurrences on one day, ordered by start time.
    fn fetch_day(&self, day: Date) -> Result<Vec<Occurrence>> {
        self.fetch(DateRange::day(day))
    }

    /// Deletes the group's slice from `from` on, then persists `occurrences`.
    ///
    /// This is one unit of work. The default runs the two steps in that
    /// order without a transaction and reports a failure in either as a
    /// single [`SchedulerError::Regeneration`] that carries the IDs already
    /// deleted; stores that can should override it atomically.
    fn replace_in_group(
        &mut self,
        group_id: &str,
        from: Date,
        excluding: Option<&str>,
        occurrences: &[Occurrence],
    ) -> Result<Replacement> {
        let removed = self
            .delete_in_group(group_id, from, excluding)
            .map_err(|e| e.during_regeneration(group_id, RegenerationStep::Delete))?;

        let mut created = Vec::with_capacity(occurrences.len());
        for occurrence in occurrences {
            match self.create(occurrence) {
                Ok(occurrence) => created.push(occurrence),
                Err(e) => {
                    warn!(
                        "Regeneration of group {group_id} stopped after {} of {} creates",
                        created.len(),
                        occurrences.len()
                    );
                    return Err(e
                        .during_regeneration(group_id, RegenerationStep::Create)
                        .with_removed(removed));
                }
            }
        }

        Ok(Replacement { removed, created })
    }
}

/// Maps a missing row to the not-found error for `id`.
pub(crate) fn require_found(id: &str, rows_affected: usize) -> Result<()> {
    if rows_affected == 0 {
        Err(SchedulerError::OccurrenceNotFound { id: id.to_string() })
    } else {
        Ok(())
    }
}
