//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::{
    models::Occurrence,
    scheduler::{
        EditOutcome,
        occurrence_ops::{EditResult, SlotCheck},
    },
};

/// The occurrences produced by creating one plan.
pub struct CreateResult(pub Vec<Occurrence>);

impl fmt::Display for CreateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(first), Some(last)) = (self.0.first(), self.0.last()) else {
            return writeln!(f, "Nothing was created.");
        };

        match &first.group_id {
            Some(group_id) => writeln!(
                f,
                "Created {} occurrence(s) in group {group_id}, {} through {}",
                self.0.len(),
                first.day(),
                last.day()
            )?,
            None => writeln!(f, "Created plan with ID: {}", first.id)?,
        }
        writeln!(f)?;
        write!(f, "{first}")
    }
}

impl fmt::Display for EditResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated plan with ID: {}", self.occurrence.id)?;
        match &self.outcome {
            EditOutcome::Updated => {}
            EditOutcome::Detached { group_id, removed } => {
                writeln!(f)?;
                writeln!(
                    f,
                    "Detached from group {group_id}; removed {} upcoming occurrence(s).",
                    removed.len()
                )?;
            }
            EditOutcome::Regenerated {
                group_id,
                removed,
                created,
            } => {
                writeln!(f)?;
                writeln!(
                    f,
                    "Regenerated group {group_id}: removed {}, created {} occurrence(s).",
                    removed.len(),
                    created.len()
                )?;
            }
        }
        writeln!(f)?;
        write!(f, "{}", self.occurrence)
    }
}

/// IDs removed by a delete operation.
pub struct DeleteResult(pub Vec<String>);

impl fmt::Display for DeleteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => writeln!(f, "Nothing was deleted."),
            [id] => writeln!(f, "Deleted plan with ID: {id}"),
            ids => writeln!(f, "Deleted {} occurrence(s).", ids.len()),
        }
    }
}

impl fmt::Display for SlotCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.free {
            return writeln!(f, "Slot is free.");
        }
        writeln!(f, "Slot conflicts with:")?;
        writeln!(f)?;
        for occurrence in &self.conflicts {
            occurrence.fmt_line(f)?;
        }
        Ok(())
    }
}
