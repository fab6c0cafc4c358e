//! High-level scheduler API for plans and repeat groups.
//!
//! [`Scheduler`] is the async entry point used by front ends. Each call opens
//! the database on a blocking thread, wraps it in a [`GroupMutator`] together
//! with the configured [`Notifier`], and runs one operation.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Scheduler    │    │  GroupMutator   │    │ PlanRepository  │
//! │  (async facade) │───▶│ (group rules)   │───▶│   + Notifier    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Scheduler`] instances with configuration
//! - [`mutator`]: Group-aware create, edit and delete over any repository
//! - [`occurrence_ops`]: The async operations exposed by [`Scheduler`]
//!
//! # Usage
//!
//! ```rust
//! use cadence_core::{
//!     SchedulerBuilder,
//!     models::{PlanTemplate, RepeatMode},
//!     params::CreatePlan,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scheduler = SchedulerBuilder::new()
//!     .with_database_path(Some("/tmp/cadence.db"))
//!     .build()
//!     .await?;
//!
//! let created = scheduler
//!     .create_plan(&CreatePlan {
//!         template: PlanTemplate {
//!             title: "Standup".to_string(),
//!             note: None,
//!             color: Default::default(),
//!             notification_options: vec![],
//!             start: "09:00".parse()?,
//!             end: "09:15".parse()?,
//!         },
//!         day: jiff::civil::date(2024, 3, 4),
//!         repeat: RepeatMode::Weekdays,
//!     })
//!     .await?;
//! println!("Created {} occurrences", created.len());
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use tokio::task;

use crate::{
    db::Database,
    error::{Result, SchedulerError},
    notify::{Muted, Notifier},
};

pub mod builder;
pub mod mutator;
pub mod occurrence_ops;

#[cfg(test)]
mod tests;

pub use builder::SchedulerBuilder;
pub use mutator::{EditOutcome, GroupMutator};

/// Main scheduler interface for managing plans.
pub struct Scheduler {
    pub(crate) db_path: PathBuf,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) notifications_enabled: bool,
}

impl Scheduler {
    /// Creates a new scheduler over the database at `db_path`.
    pub(crate) fn new(
        db_path: PathBuf,
        notifier: Arc<dyn Notifier>,
        notifications_enabled: bool,
    ) -> Self {
        Self {
            db_path,
            notifier,
            notifications_enabled,
        }
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Runs a read-only closure against a freshly opened database.
    pub(crate) async fn with_database<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            f(&db)
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Runs a closure against a group mutator over a freshly opened database.
    ///
    /// When notifications are disabled, scheduling is muted but
    /// cancellation still reaches the notifier.
    pub(crate) async fn with_mutator<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut GroupMutator<'_, Database>) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        let notifier = Arc::clone(&self.notifier);
        let notifications_enabled = self.notifications_enabled;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let muted = Muted(notifier.as_ref());
            let notifier: &dyn Notifier = if notifications_enabled {
                notifier.as_ref()
            } else {
                &muted
            };
            f(&mut GroupMutator::new(&mut db, notifier))
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
