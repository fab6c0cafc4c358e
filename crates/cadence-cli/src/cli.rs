//! Command handlers.
//!
//! [`Cli`] runs one subcommand against the scheduler and prints the result,
//! as markdown through the terminal renderer or as JSON with `--json`.

use std::fmt::Display;

use anyhow::{Context, Result};
use cadence_core::{
    Agenda, CreateResult, DeleteResult, Id, Scheduler, SchedulerError, display::DayHeading,
};
use jiff::civil::Date;
use log::debug;
use serde::Serialize;
use serde_json::json;

use crate::{
    args::{
        CheckArgs, ClampArgs, Commands, CreateArgs, DeleteGroupArgs, EditArgs, IdArgs, ListArgs,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    scheduler: Scheduler,
    renderer: TerminalRenderer,
    json: bool,
    today: Date,
}

impl Cli {
    pub fn new(scheduler: Scheduler, renderer: TerminalRenderer, json: bool, today: Date) -> Self {
        Self {
            scheduler,
            renderer,
            json,
            today,
        }
    }

    pub async fn handle(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Create(args) => self.create(args).await,
            Commands::List(args) => self.list(args).await,
            Commands::Show(args) => self.show(args).await,
            Commands::Edit(args) => self.edit(args).await,
            Commands::Toggle(args) => self.toggle(args).await,
            Commands::Delete(args) => self.delete(args).await,
            Commands::DeleteGroup(args) => self.delete_group(args).await,
            Commands::Check(args) => self.check(args).await,
            Commands::Clamp(args) => self.clamp(args).await,
        }
    }

    /// Prints `value` as JSON or `markdown` through the renderer.
    fn emit<T: Serialize>(&self, value: &T, markdown: impl Display) -> Result<()> {
        if self.json {
            let output =
                serde_json::to_string_pretty(value).context("Failed to serialize output")?;
            println!("{output}");
            Ok(())
        } else {
            self.renderer.render(&markdown.to_string())
        }
    }

    async fn create(&self, args: CreateArgs) -> Result<()> {
        let params = args.into_params(self.today);
        let created = self.scheduler.create_plan(&params).await?;
        debug!("Created {} occurrence(s)", created.len());
        self.emit(&created, CreateResult(created.clone()))
    }

    pub async fn list(&self, args: ListArgs) -> Result<()> {
        let params = args.into_params(self.today);
        let plans = self.scheduler.list_plans(&params).await?;
        self.emit(&plans, Agenda(plans.clone()))
    }

    async fn show(&self, args: IdArgs) -> Result<()> {
        let params: Id = args.into();
        let occurrence = self
            .scheduler
            .get_plan(&params)
            .await?
            .ok_or(SchedulerError::OccurrenceNotFound { id: params.id })?;
        self.emit(&occurrence, &occurrence)
    }

    async fn edit(&self, args: EditArgs) -> Result<()> {
        let params = args.into_params(self.today);
        let result = self.scheduler.edit_plan(&params).await?;
        self.emit(&result, &result)
    }

    async fn toggle(&self, args: IdArgs) -> Result<()> {
        let occurrence = self.scheduler.toggle_completion(&args.into()).await?;
        self.emit(&occurrence, &occurrence)
    }

    async fn delete(&self, args: IdArgs) -> Result<()> {
        let params: Id = args.into();
        self.scheduler.delete_plan(&params).await?;
        let removed = vec![params.id];
        self.emit(&removed, DeleteResult(removed.clone()))
    }

    async fn delete_group(&self, args: DeleteGroupArgs) -> Result<()> {
        let params = args.into_params(self.today);
        let removed = self.scheduler.delete_group(&params).await?;
        self.emit(&removed, DeleteResult(removed.clone()))
    }

    async fn check(&self, args: CheckArgs) -> Result<()> {
        let params = args.into_params(self.today)?;
        let check = self.scheduler.check_slot(&params).await?;
        self.emit(
            &check,
            format_args!("{} on {}\n\n{check}", params.interval, DayHeading(params.day)),
        )
    }

    async fn clamp(&self, args: ClampArgs) -> Result<()> {
        let params = args.into_params(self.today);
        let clamped = self.scheduler.clamp_drag(&params).await?;
        self.emit(
            &json!({
                "anchor": params.anchor,
                "cursor": params.cursor,
                "clamped": clamped,
            }),
            format_args!(
                "Drag from {} towards {} stops at {clamped}\n",
                params.anchor, params.cursor
            ),
        )
    }
}
