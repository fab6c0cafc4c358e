//! Display formatting for occurrences and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly; the wrappers here
//! cover collections and operation outcomes. All output is markdown so the
//! CLI can print it as is.
//!
//! - [`collections`]: [`Agenda`], occurrences grouped under day headings
//! - [`results`]: create, edit, delete and slot-check outcomes
//! - [`datetime`]: timestamp and day formatting
//! - [`models`]: Display for [`crate::models::Occurrence`]

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;


pub use collections::Agenda;
pub use datetime::{DayHeading, LocalDateTime};
pub use results::{CreateResult, DeleteResult};
