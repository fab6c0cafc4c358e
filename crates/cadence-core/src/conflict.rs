//! Overlap tests and drag clamping on a single day's timeline.
//!
//! The interval functions are pure and allocation-free so they can run on
//! every pointer-move event of an interactive drag. Intervals are half-open:
//! touching endpoints never conflict.

use log::debug;

use crate::models::{MinuteInterval, MinuteOfDay, Occurrence};

/// The busy intervals of a day's occurrences, skipping `excluding`.
pub fn busy_intervals(occurrences: &[Occurrence], excluding: Option<&str>) -> Vec<MinuteInterval> {
    occurrences
        .iter()
        .filter(|occurrence| Some(occurrence.id.as_str()) != excluding)
        .map(Occurrence::interval)
        .collect()
}

/// Whether two half-open intervals share any minute.
pub fn overlaps(a: &MinuteInterval, b: &MinuteInterval) -> bool {
    a.start < b.end && a.end > b.start
}

/// Whether `candidate` overlaps any member of `existing`.
pub fn conflicts(candidate: &MinuteInterval, existing: &[MinuteInterval]) -> bool {
    existing.iter().any(|busy| overlaps(candidate, busy))
}

/// The furthest point a drag from `anchor` towards `cursor` may reach.
///
/// Dragging forward stops at the first busy start after the anchor; dragging
/// backward stops at the last busy end before it. A drag that begins inside
/// a busy slot cannot leave the anchor.
pub fn clamp_cursor(
    anchor: MinuteOfDay,
    cursor: MinuteOfDay,
    existing: &[MinuteInterval],
) -> MinuteOfDay {
    let clamped = if cursor >= anchor {
        clamp_forward(anchor, cursor, existing)
    } else {
        clamp_backward(anchor, cursor, existing)
    };
    if clamped != cursor {
        debug!("Clamped drag from {anchor} towards {cursor} at {clamped}");
    }
    clamped
}

fn clamp_forward(
    anchor: MinuteOfDay,
    cursor: MinuteOfDay,
    existing: &[MinuteInterval],
) -> MinuteOfDay {
    if existing.iter().any(|busy| busy.contains(anchor)) {
        return anchor;
    }
    existing
        .iter()
        .map(|busy| busy.start)
        .filter(|start| *start > anchor && *start <= cursor)
        .min()
        .unwrap_or(cursor)
}

fn clamp_backward(
    anchor: MinuteOfDay,
    cursor: MinuteOfDay,
    existing: &[MinuteInterval],
) -> MinuteOfDay {
    // Mirror of the forward case: the minute just before the anchor is busy.
    if existing
        .iter()
        .any(|busy| busy.start < anchor && anchor <= busy.end)
    {
        return anchor;
    }
    existing
        .iter()
        .map(|busy| busy.end)
        .filter(|end| *end >= cursor && *end < anchor)
        .max()
        .unwrap_or(cursor)
}

/// Whether a finished selection between two points may be committed.
pub fn is_valid_selection(
    start: MinuteOfDay,
    end: MinuteOfDay,
    existing: &[MinuteInterval],
) -> bool {
    let candidate = MinuteInterval::spanning(start, end);
    !candidate.is_empty() && !conflicts(&candidate, existing)
}

/// State of an in-progress drag over a day's timeline.
///
/// Nothing is persisted until [`DragSelection::commit`] returns an interval;
/// dropping the value abandons the drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSelection {
    anchor: MinuteOfDay,
    cursor: MinuteOfDay,
}

impl DragSelection {
    /// Starts a drag at `anchor`.
    pub fn begin(anchor: MinuteOfDay) -> Self {
        Self {
            anchor,
            cursor: anchor,
        }
    }

    /// Moves the cursor towards `cursor`, clamped against `existing`.
    ///
    /// Returns the clamped cursor.
    pub fn drag_to(&mut self, cursor: MinuteOfDay, existing: &[MinuteInterval]) -> MinuteOfDay {
        self.cursor = clamp_cursor(self.anchor, cursor, existing);
        self.cursor
    }

    pub fn anchor(&self) -> MinuteOfDay {
        self.anchor
    }

    pub fn cursor(&self) -> MinuteOfDay {
        self.cursor
    }

    /// Current selection, ordered. Empty until the cursor leaves the anchor.
    pub fn interval(&self) -> MinuteInterval {
        MinuteInterval::spanning(self.anchor, self.cursor)
    }

    /// Whether the current selection could be committed.
    pub fn is_valid(&self, existing: &[MinuteInterval]) -> bool {
        is_valid_selection(self.anchor, self.cursor, existing)
    }

    /// Finishes the drag, yielding the interval if it is valid.
    pub fn commit(self, existing: &[MinuteInterval]) -> Option<MinuteInterval> {
        self.is_valid(existing).then(|| self.interval())
    }
}
