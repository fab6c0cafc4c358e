#![allow(dead_code)]

use std::collections::BTreeMap;

use cadence_core::{
    DateRange, Notifier, Occurrence, PlanRepository, Result, Scheduler, SchedulerBuilder,
    SchedulerError,
};
use jiff::civil::Date;
use tempfile::TempDir;

/// Helper function to create a test scheduler
pub async fn create_test_scheduler() -> (TempDir, Scheduler) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let scheduler = SchedulerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_notifications(false)
        .build()
        .await
        .expect("Failed to create scheduler");
    (temp_dir, scheduler)
}

/// In-memory repository with an optional injected create failure.
#[derive(Default)]
pub struct MemoryRepository {
    rows: BTreeMap<String, Occurrence>,
    /// Creates succeed this many times, then fail
    pub fail_creates_after: Option<usize>,
    creates: usize,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored occurrence of `group_id`, ordered by start time.
    pub fn group(&self, group_id: &str) -> Vec<Occurrence> {
        let mut members: Vec<Occurrence> = self
            .rows
            .values()
            .filter(|o| o.group_id.as_deref() == Some(group_id))
            .cloned()
            .collect();
        members.sort_by_key(|o| o.start_time);
        members
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

impl PlanRepository for MemoryRepository {
    fn fetch(&self, range: DateRange) -> Result<Vec<Occurrence>> {
        let mut found: Vec<Occurrence> = self
            .rows
            .values()
            .filter(|o| range.contains(o.day()))
            .cloned()
            .collect();
        found.sort_by_key(|o| o.start_time);
        Ok(found)
    }

    fn get(&self, id: &str) -> Result<Option<Occurrence>> {
        Ok(self.rows.get(id).cloned())
    }

    fn create(&mut self, occurrence: &Occurrence) -> Result<Occurrence> {
        if self.fail_creates_after.is_some_and(|limit| self.creates >= limit) {
            return Err(SchedulerError::Configuration {
                message: "injected create failure".to_string(),
            });
        }
        self.creates += 1;
        self.rows.insert(occurrence.id.clone(), occurrence.clone());
        Ok(occurrence.clone())
    }

    fn update(&mut self, occurrence: &Occurrence) -> Result<Occurrence> {
        let Some(row) = self.rows.get_mut(&occurrence.id) else {
            return Err(SchedulerError::OccurrenceNotFound {
                id: occurrence.id.clone(),
            });
        };
        *row = occurrence.clone();
        Ok(occurrence.clone())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.rows
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| SchedulerError::OccurrenceNotFound { id: id.to_string() })
    }

    fn delete_in_group(
        &mut self,
        group_id: &str,
        from: Date,
        excluding: Option<&str>,
    ) -> Result<Vec<String>> {
        let removed: Vec<String> = self
            .group(group_id)
            .into_iter()
            .filter(|o| o.day() >= from && Some(o.id.as_str()) != excluding)
            .map(|o| o.id)
            .collect();
        for id in &removed {
            self.rows.remove(id);
        }
        Ok(removed)
    }
}

/// Notifier whose every call fails.
pub struct BrokenNotifier;

impl Notifier for BrokenNotifier {
    fn schedule(&self, _occurrence: &Occurrence) -> Result<()> {
        Err(SchedulerError::Notifier {
            message: "scheduler unavailable".to_string(),
        })
    }

    fn cancel(&self, _occurrence_id: &str) -> Result<()> {
        Err(SchedulerError::Notifier {
            message: "scheduler unavailable".to_string(),
        })
    }
}
