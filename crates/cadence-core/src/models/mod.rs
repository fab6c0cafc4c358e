//! Data models for scheduled occurrences.
//!
//! An [`Occurrence`] is one concrete block on one calendar day. Recurring
//! plans are stored as a set of independent occurrences sharing a group id;
//! there is no stored rule object, only the [`RepeatMode`] each occurrence
//! was created or last edited with.
//!
//! Timeline positions within a day are [`MinuteOfDay`] values and slots are
//! half-open [`MinuteInterval`]s.

pub mod color;
pub mod minute;
pub mod notification;
pub mod occurrence;
pub mod repeat;
pub mod requests;


pub use color::PlanColor;
pub use minute::{MinuteInterval, MinuteOfDay};
pub use notification::{NotificationOption, format_options, normalize_options, parse_options};
pub use occurrence::Occurrence;
pub use repeat::RepeatMode;
pub use requests::{EditFields, PlanTemplate};
