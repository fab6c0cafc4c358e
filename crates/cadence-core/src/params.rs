//! Parameter structures for scheduler operations.
//!
//! These are plain data types shared by every front end. Interface layers
//! (such as the CLI's clap arguments) define their own wrappers and convert
//! into these with `From`, so the core stays free of UI framework derives.
//!
//! ```ignore
//! #[derive(Args)]
//! pub struct DeleteArgs {
//!     pub id: String,
//! }
//!
//! impl From<DeleteArgs> for Id {
//!     fn from(args: DeleteArgs) -> Self {
//!         Id { id: args.id }
//!     }
//! }
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::{EditFields, MinuteInterval, MinuteOfDay, PlanTemplate, RepeatMode};

/// Parameters for operations requiring just an occurrence ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the occurrence to operate on
    pub id: String,
}

/// Parameters for creating a plan and, if it repeats, its group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlan {
    pub template: PlanTemplate,
    /// Day of the first occurrence
    pub day: Date,
    pub repeat: RepeatMode,
}

/// Parameters for editing one occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditPlan {
    pub id: String,
    pub fields: EditFields,
    /// New repeat mode; `None` keeps the current one
    pub repeat: Option<RepeatMode>,
    /// Occurrences dated before this day are never touched by propagation
    pub today: Date,
}

/// Parameters for deleting a repeat group or part of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteGroup {
    pub group_id: String,
    /// First day to delete; `None` deletes the whole series
    pub from: Option<Date>,
    /// An occurrence to keep even if it falls in the slice
    pub excluding: Option<String>,
}

/// Parameters for listing occurrences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPlans {
    pub from: Date,
    /// Last day to include; `None` lists only `from`
    pub to: Option<Date>,
}

/// Parameters for testing a time block against a day's occurrences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSlot {
    pub day: Date,
    pub interval: MinuteInterval,
    /// Occurrence being edited, ignored as an obstacle
    pub excluding: Option<String>,
}

/// Parameters for clamping a drag on a day's timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClampDrag {
    pub day: Date,
    pub anchor: MinuteOfDay,
    pub cursor: MinuteOfDay,
    /// Occurrence being edited, ignored as an obstacle
    pub excluding: Option<String>,
}
