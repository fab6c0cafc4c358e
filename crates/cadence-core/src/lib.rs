//! Core library for the Cadence plan scheduler.
//!
//! Plans are time blocks on a calendar day. A plan may repeat; every
//! repetition is stored as an independent occurrence linked to its siblings
//! by a shared group id. This crate expands repeat modes into concrete days,
//! checks time blocks for conflicts on a day's timeline, and keeps repeat
//! groups consistent when one member is edited or deleted.
//!
//! # Layers
//!
//! - [`calendar`], [`recurrence`] and [`conflict`] are pure functions over
//!   civil dates and minutes of the day; none of them reads a clock.
//! - [`scheduler::GroupMutator`] applies group rules through the
//!   [`repository::PlanRepository`] and [`notify::Notifier`] boundaries.
//! - [`Scheduler`] is the async facade over the SQLite [`Database`].
//! - [`display`] renders models and results as markdown.
//!
//! # Quick Start
//!
//! ```rust
//! use cadence_core::{SchedulerBuilder, params::ListPlans};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scheduler = SchedulerBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let today = jiff::Zoned::now().date();
//! let plans = scheduler
//!     .list_plans(&ListPlans {
//!         from: today,
//!         to: None,
//!     })
//!     .await?;
//! println!("{}", cadence_core::display::Agenda(plans));
//! # Ok(())
//! # }
//! ```

pub mod calendar;
pub mod conflict;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod notify;
pub mod params;
pub mod recurrence;
pub mod repository;
pub mod scheduler;

// Re-export commonly used types
pub use db::Database;
pub use display::{Agenda, CreateResult, DeleteResult};
pub use error::{RegenerationStep, Result, SchedulerError};
pub use models::{
    EditFields, MinuteInterval, MinuteOfDay, NotificationOption, Occurrence, PlanColor,
    PlanTemplate, RepeatMode,
};
pub use notify::{LogNotifier, Notifier, ReminderQueue};
pub use params::{CheckSlot, ClampDrag, CreatePlan, DeleteGroup, EditPlan, Id, ListPlans};
pub use repository::{DateRange, PlanRepository, Replacement};
pub use scheduler::{
    EditOutcome, GroupMutator, Scheduler, SchedulerBuilder,
    occurrence_ops::{EditResult, SlotCheck},
};
