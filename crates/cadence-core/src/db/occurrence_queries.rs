//! Occurrence CRUD operations and queries.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use log::debug;
use rusqlite::{Connection, OptionalExtension, Row, params, types::Type};

use crate::{
    error::{DatabaseResultExt, RegenerationStep, Result},
    models::{Occurrence, format_options, parse_options},
    repository::{DateRange, PlanRepository, Replacement, require_found},
};

const OCCURRENCE_COLUMNS: &str = "id, group_id, title, note, color, notification_options, start_time, end_time, repeat_mode, is_completed, created_at, updated_at";
const INSERT_OCCURRENCE_SQL: &str = "INSERT INTO occurrences (id, group_id, title, note, color, notification_options, start_time, end_time, day_key, repeat_mode, is_completed, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";
const UPDATE_OCCURRENCE_SQL: &str = "UPDATE occurrences SET group_id = ?2, title = ?3, note = ?4, color = ?5, notification_options = ?6, start_time = ?7, end_time = ?8, day_key = ?9, repeat_mode = ?10, is_completed = ?11, updated_at = ?12 WHERE id = ?1";
const DELETE_OCCURRENCE_SQL: &str = "DELETE FROM occurrences WHERE id = ?1";
const GROUP_SLICE_FILTER: &str = "group_id = ?1 AND day_key >= ?2 AND (?3 IS NULL OR id != ?3)";

/// Sortable integer key of a calendar day.
///
/// Ordering matches date ordering across the whole supported range,
/// including negative years.
pub(crate) fn day_key(day: Date) -> i64 {
    i64::from(day.year()) * 10_000 + i64::from(day.month()) * 100 + i64::from(day.day())
}

fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid value '{raw}': {e}"),
            )),
        )
    })
}

fn occurrence_from_row(row: &Row<'_>) -> rusqlite::Result<Occurrence> {
    Ok(Occurrence {
        id: row.get(0)?,
        group_id: row.get(1)?,
        title: row.get(2)?,
        note: row.get(3)?,
        color: parse_column(row, 4)?,
        notification_options: parse_options(row.get::<_, Option<String>>(5)?.as_deref()),
        start_time: parse_column(row, 6)?,
        end_time: parse_column(row, 7)?,
        repeat_mode: parse_column(row, 8)?,
        is_completed: row.get(9)?,
        created_at: parse_column(row, 10)?,
        updated_at: parse_column(row, 11)?,
    })
}

fn insert_occurrence(connection: &Connection, occurrence: &Occurrence) -> rusqlite::Result<usize> {
    connection.execute(
        INSERT_OCCURRENCE_SQL,
        params![
            occurrence.id,
            occurrence.group_id,
            occurrence.title,
            occurrence.note,
            occurrence.color.as_str(),
            format_options(&occurrence.notification_options),
            occurrence.start_time.to_string(),
            occurrence.end_time.to_string(),
            day_key(occurrence.day()),
            occurrence.repeat_mode.as_str(),
            occurrence.is_completed,
            occurrence.created_at.to_string(),
            occurrence.updated_at.to_string(),
        ],
    )
}

/// Removes a group's slice and returns the IDs that were removed.
fn delete_group_slice(
    connection: &Connection,
    group_id: &str,
    from: Date,
    excluding: Option<&str>,
) -> rusqlite::Result<Vec<String>> {
    let ids = connection
        .prepare(&format!(
            "SELECT id FROM occurrences WHERE {GROUP_SLICE_FILTER} ORDER BY day_key"
        ))?
        .query_map(params![group_id, day_key(from), excluding], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;

    connection.execute(
        &format!("DELETE FROM occurrences WHERE {GROUP_SLICE_FILTER}"),
        params![group_id, day_key(from), excluding],
    )?;

    Ok(ids)
}

impl super::Database {
    /// Every occurrence carrying `group_id`, ordered by start time.
    pub fn fetch_group(&self, group_id: &str) -> Result<Vec<Occurrence>> {
        self.connection
            .prepare(&format!(
                "SELECT {OCCURRENCE_COLUMNS} FROM occurrences WHERE group_id = ?1 ORDER BY day_key, start_time"
            ))
            .db_context("Failed to prepare query")?
            .query_map(params![group_id], occurrence_from_row)
            .db_context("Failed to query group")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch group")
    }
}

impl PlanRepository for super::Database {
    fn fetch(&self, range: DateRange) -> Result<Vec<Occurrence>> {
        self.connection
            .prepare(&format!(
                "SELECT {OCCURRENCE_COLUMNS} FROM occurrences WHERE day_key BETWEEN ?1 AND ?2 ORDER BY day_key, start_time"
            ))
            .db_context("Failed to prepare query")?
            .query_map(
                params![day_key(range.from), day_key(range.to)],
                occurrence_from_row,
            )
            .db_context("Failed to query occurrences")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch occurrences")
    }

    fn get(&self, id: &str) -> Result<Option<Occurrence>> {
        self.connection
            .query_row(
                &format!("SELECT {OCCURRENCE_COLUMNS} FROM occurrences WHERE id = ?1"),
                params![id],
                occurrence_from_row,
            )
            .optional()
            .db_context("Failed to query occurrence")
    }

    fn create(&mut self, occurrence: &Occurrence) -> Result<Occurrence> {
        insert_occurrence(&self.connection, occurrence).db_context("Failed to insert occurrence")?;
        Ok(occurrence.clone())
    }

    fn update(&mut self, occurrence: &Occurrence) -> Result<Occurrence> {
        let rows_affected = self
            .connection
            .execute(
                UPDATE_OCCURRENCE_SQL,
                params![
                    occurrence.id,
                    occurrence.group_id,
                    occurrence.title,
                    occurrence.note,
                    occurrence.color.as_str(),
                    format_options(&occurrence.notification_options),
                    occurrence.start_time.to_string(),
                    occurrence.end_time.to_string(),
                    day_key(occurrence.day()),
                    occurrence.repeat_mode.as_str(),
                    occurrence.is_completed,
                    occurrence.updated_at.to_string(),
                ],
            )
            .db_context("Failed to update occurrence")?;

        require_found(&occurrence.id, rows_affected)?;
        Ok(occurrence.clone())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let rows_affected = self
            .connection
            .execute(DELETE_OCCURRENCE_SQL, params![id])
            .db_context("Failed to delete occurrence")?;

        require_found(id, rows_affected)
    }

    fn delete_in_group(
        &mut self,
        group_id: &str,
        from: Date,
        excluding: Option<&str>,
    ) -> Result<Vec<String>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let removed = delete_group_slice(&tx, group_id, from, excluding)
            .db_context("Failed to delete group occurrences")?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Deleted {} occurrence(s) of group {group_id} from {from}", removed.len());
        Ok(removed)
    }

    fn replace_in_group(
        &mut self,
        group_id: &str,
        from: Date,
        excluding: Option<&str>,
        occurrences: &[Occurrence],
    ) -> Result<Replacement> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")
            .map_err(|e| e.during_regeneration(group_id, RegenerationStep::Delete))?;

        let removed = delete_group_slice(&tx, group_id, from, excluding)
            .db_context("Failed to delete group occurrences")
            .map_err(|e| e.during_regeneration(group_id, RegenerationStep::Delete))?;

        for occurrence in occurrences {
            insert_occurrence(&tx, occurrence)
                .db_context("Failed to insert occurrence")
                .map_err(|e| e.during_regeneration(group_id, RegenerationStep::Create))?;
        }

        tx.commit()
            .db_context("Failed to commit transaction")
            .map_err(|e| e.during_regeneration(group_id, RegenerationStep::Create))?;

        Ok(Replacement {
            removed,
            created: occurrences.to_vec(),
        })
    }
}
