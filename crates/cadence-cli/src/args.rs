//! Command-line argument definitions.
//!
//! Each subcommand has a clap wrapper that converts into the matching core
//! parameter type. Wrappers that default a day to "today" take it as an
//! argument of their conversion.

use std::path::PathBuf;

use cadence_core::{
    CheckSlot, ClampDrag, CreatePlan, DeleteGroup, EditFields, EditPlan, Id, ListPlans,
    MinuteInterval, MinuteOfDay, PlanColor, PlanTemplate, RepeatMode, models::parse_options,
};
use clap::{Parser, Subcommand};
use jiff::civil::Date;

/// Recurring plan scheduler for your day
///
/// Plans are time blocks on a calendar day. A repeating plan is stored as
/// one occurrence per day, and edits to one occurrence can reshape the rest
/// of its series without touching days that already passed.
#[derive(Parser)]
#[command(version, about, name = "cadence")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/cadence/cadence.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Day to treat as today (YYYY-MM-DD). Defaults to the local date
    #[arg(long, global = true)]
    pub today: Option<Date>,

    /// Do not arm reminders for created or edited plans
    #[arg(long, global = true)]
    pub no_notify: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a plan, repeating it if asked
    #[command(alias = "c")]
    Create(CreateArgs),
    /// List plans for a day or a range of days
    #[command(aliases = ["l", "ls"])]
    List(ListArgs),
    /// Show one occurrence
    #[command(alias = "s")]
    Show(IdArgs),
    /// Edit one occurrence, reshaping its series if the repeat mode changes
    #[command(alias = "e")]
    Edit(EditArgs),
    /// Mark an occurrence done, or not done again
    #[command(alias = "t")]
    Toggle(IdArgs),
    /// Delete one occurrence
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
    /// Delete the rest of a series, or all of it
    DeleteGroup(DeleteGroupArgs),
    /// Check whether a time block is free
    Check(CheckArgs),
    /// Clamp a drag between two times against a day's plans
    Clamp(ClampArgs),
}

/// Create a new plan
#[derive(Parser)]
pub struct CreateArgs {
    /// Title of the plan
    pub title: String,
    /// Start time (HH:MM)
    #[arg(long)]
    pub start: MinuteOfDay,
    /// End time (HH:MM, 24:00 for midnight)
    #[arg(long)]
    pub end: MinuteOfDay,
    /// Day of the first occurrence. Defaults to today
    #[arg(long)]
    pub day: Option<Date>,
    /// Optional note shown with the plan
    #[arg(short, long)]
    pub note: Option<String>,
    #[arg(long, default_value_t = PlanColor::default())]
    pub color: PlanColor,
    /// Repeat mode: none, daily, weekdays, weekly, monthly,
    /// weekly-in-current-week or monthly-in-current-month
    #[arg(short, long, default_value_t = RepeatMode::None)]
    pub repeat: RepeatMode,
    /// Comma-separated reminders: start_10, start_5, end_time. Defaults to
    /// end_time; pass an empty string for none
    #[arg(long)]
    pub notify: Option<String>,
}

impl CreateArgs {
    pub fn into_params(self, today: Date) -> CreatePlan {
        CreatePlan {
            template: PlanTemplate {
                title: self.title,
                note: self.note,
                color: self.color,
                notification_options: parse_options(self.notify.as_deref()),
                start: self.start,
                end: self.end,
            },
            day: self.day.unwrap_or(today),
            repeat: self.repeat,
        }
    }
}

/// List plans
#[derive(Parser, Default)]
pub struct ListArgs {
    /// First day to list. Defaults to today
    #[arg(long)]
    pub from: Option<Date>,
    /// Last day to list. Defaults to the first day
    #[arg(long)]
    pub to: Option<Date>,
}

impl ListArgs {
    pub fn into_params(self, today: Date) -> ListPlans {
        ListPlans {
            from: self.from.unwrap_or(today),
            to: self.to,
        }
    }
}

/// Select one occurrence by ID
#[derive(Parser)]
pub struct IdArgs {
    /// ID of the occurrence
    pub id: String,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Edit an occurrence
#[derive(Parser)]
pub struct EditArgs {
    /// ID of the occurrence to edit
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    /// New note; an empty string clears it
    #[arg(short, long)]
    pub note: Option<String>,
    #[arg(long)]
    pub color: Option<PlanColor>,
    #[arg(long)]
    pub start: Option<MinuteOfDay>,
    #[arg(long)]
    pub end: Option<MinuteOfDay>,
    /// Comma-separated reminders; an empty string removes them all
    #[arg(long)]
    pub notify: Option<String>,
    /// New repeat mode. Keeps the current one if omitted
    #[arg(short, long)]
    pub repeat: Option<RepeatMode>,
}

impl EditArgs {
    pub fn into_params(self, today: Date) -> EditPlan {
        EditPlan {
            id: self.id,
            fields: EditFields {
                title: self.title,
                note: self.note,
                color: self.color,
                notification_options: self.notify.map(|raw| parse_options(Some(&raw))),
                start: self.start,
                end: self.end,
            },
            repeat: self.repeat,
            today,
        }
    }
}

/// Delete a series
#[derive(Parser)]
pub struct DeleteGroupArgs {
    /// ID of the repeat group
    pub group_id: String,
    /// First day to delete. Defaults to today
    #[arg(long, conflicts_with = "all")]
    pub from: Option<Date>,
    /// Delete the whole series, past occurrences included
    #[arg(long)]
    pub all: bool,
    /// Occurrence to keep
    #[arg(long)]
    pub keep: Option<String>,
}

impl DeleteGroupArgs {
    pub fn into_params(self, today: Date) -> DeleteGroup {
        DeleteGroup {
            group_id: self.group_id,
            from: (!self.all).then(|| self.from.unwrap_or(today)),
            excluding: self.keep,
        }
    }
}

/// Check a time block
#[derive(Parser)]
pub struct CheckArgs {
    /// Start time (HH:MM)
    pub start: MinuteOfDay,
    /// End time (HH:MM)
    pub end: MinuteOfDay,
    /// Day to check. Defaults to today
    #[arg(long)]
    pub day: Option<Date>,
    /// Occurrence to ignore, such as the one being moved
    #[arg(long)]
    pub excluding: Option<String>,
}

impl CheckArgs {
    pub fn into_params(self, today: Date) -> anyhow::Result<CheckSlot> {
        let interval = MinuteInterval::new(self.start, self.end).ok_or_else(|| {
            anyhow::anyhow!("End {} must be after start {}", self.end, self.start)
        })?;
        Ok(CheckSlot {
            day: self.day.unwrap_or(today),
            interval,
            excluding: self.excluding,
        })
    }
}

/// Clamp a drag
#[derive(Parser)]
pub struct ClampArgs {
    /// Where the drag started (HH:MM)
    pub anchor: MinuteOfDay,
    /// Where the pointer is now (HH:MM)
    pub cursor: MinuteOfDay,
    /// Day of the timeline. Defaults to today
    #[arg(long)]
    pub day: Option<Date>,
    /// Occurrence to ignore, such as the one being moved
    #[arg(long)]
    pub excluding: Option<String>,
}

impl ClampArgs {
    pub fn into_params(self, today: Date) -> ClampDrag {
        ClampDrag {
            day: self.day.unwrap_or(today),
            anchor: self.anchor,
            cursor: self.cursor,
            excluding: self.excluding,
        }
    }
}
