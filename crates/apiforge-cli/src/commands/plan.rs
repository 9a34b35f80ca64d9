// crates/apiforge-cli/src/commands/plan.rs
// ============================================================================
// Module: Plan and Status Commands
// Description: Plans intents into tasks and tracks task status.
// Purpose: Drive the intent matcher and the persisted plan store.
// Dependencies: apiforge-planner, clap, time
// ============================================================================

//! ## Overview
//! `plan` matches an intent against the contract and records the task.
//! `status` lists the plan or moves a task forward; completion belongs to
//! `generate --task`, which records the written files.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use apiforge_config::ApiforgeConfig;
use apiforge_planner::Plan;
use apiforge_planner::PlanError;
use apiforge_planner::PlanOutcome;
use apiforge_planner::Task;
use apiforge_planner::TaskStatus;
use clap::Args;
use clap::ValueEnum;
use time::OffsetDateTime;

use super::contract_path;
use super::load_operations;
use super::plan_store;
use crate::CliError;
use crate::CliResult;
use crate::EXIT_NO_MATCH;

// ============================================================================
// SECTION: Arguments
// ============================================================================

/// Arguments for `apiforge plan`.
#[derive(Debug, Clone, Default, Args)]
pub struct PlanArgs {
    /// Free-text intent, e.g. `create and list all pets`.
    #[arg(required = true, num_args = 1.., value_name = "INTENT")]
    pub intent: Vec<String>,
    /// Contract path (overrides `contract.path`).
    #[arg(long, value_name = "FILE")]
    pub contract: Option<PathBuf>,
    /// Plan file (overrides `plan.path`).
    #[arg(long, value_name = "FILE")]
    pub plan: Option<PathBuf>,
    /// Print the task without recording it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `apiforge status`.
#[derive(Debug, Clone, Default, Args)]
pub struct StatusArgs {
    /// Task to update; omit to list the plan.
    #[arg(value_name = "TASK_ID", requires = "status")]
    pub task: Option<String>,
    /// New status for the task.
    #[arg(value_enum, value_name = "STATUS")]
    pub status: Option<StatusArg>,
    /// Plan file (overrides `plan.path`).
    #[arg(long, value_name = "FILE")]
    pub plan: Option<PathBuf>,
}

/// Task status as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Not started.
    Pending,
    /// Being worked on.
    InProgress,
    /// Done; accepted only for tasks already completed by `generate --task`.
    Completed,
}

impl From<StatusArg> for TaskStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Pending => Self::Pending,
            StatusArg::InProgress => Self::InProgress,
            StatusArg::Completed => Self::Completed,
        }
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes `apiforge plan`.
///
/// An intent that matches nothing prints the operation catalog and exits
/// with [`EXIT_NO_MATCH`].
///
/// # Errors
///
/// Returns [`CliError`] when the contract cannot be loaded or the plan file
/// cannot be updated.
pub fn run_plan(
    config: &ApiforgeConfig,
    args: &PlanArgs,
    now: OffsetDateTime,
    out: &mut dyn Write,
) -> CliResult<ExitCode> {
    let intent = args.intent.join(" ");
    if intent.trim().is_empty() {
        return Err(CliError::Usage("intent must be non-empty".to_string()));
    }
    let path = contract_path(config, args.contract.as_deref());
    let (_, operations) = load_operations(&path, None)?;
    let task = match apiforge_planner::plan(&intent, &operations) {
        PlanOutcome::Task(task) => task,
        PlanOutcome::NoMatch(no_match) => {
            writeln!(out, "no operation matches \"{}\"; available operations:", no_match.intent)?;
            out.write_all(no_match.catalog.as_bytes())?;
            return Ok(ExitCode::from(EXIT_NO_MATCH));
        }
    };
    if args.dry_run {
        write_task(out, &task)?;
        return Ok(ExitCode::SUCCESS);
    }
    let store = plan_store(config, args.plan.as_deref());
    let recorded = store.record(&intent, task, now)?;
    write_task(out, &recorded)?;
    writeln!(out, "recorded in {}", store.path().display())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `apiforge status`.
///
/// # Errors
///
/// Returns [`CliError::Plan`] when the plan is missing, the task is
/// unknown, or the transition is not allowed, and [`CliError::Usage`] when
/// asked to complete a task whose files were never generated.
pub fn run_status(
    config: &ApiforgeConfig,
    args: &StatusArgs,
    out: &mut dyn Write,
) -> CliResult<ExitCode> {
    let store = plan_store(config, args.plan.as_deref());
    match (&args.task, args.status) {
        (Some(id), Some(status)) => {
            let task = store.set_status(id, status.into()).map_err(|err| match err {
                PlanError::ArtifactsRequired(id) => CliError::Usage(format!(
                    "{id} is completed by `apiforge generate --task {id}` once its files are \
                     written"
                )),
                other => other.into(),
            })?;
            writeln!(out, "{} is now {}", task.id, task.status)?;
        }
        _ => write_plan(out, &store.load()?)?,
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Writes one task block.
fn write_task(out: &mut dyn Write, task: &Task) -> std::io::Result<()> {
    writeln!(out, "{} [{}] {}", task.id, task.status, task.title)?;
    writeln!(out, "  operations: {}", task.operations.join(", "))?;
    if !task.artifacts.is_empty() {
        writeln!(out, "  artifacts: {} files", task.artifacts.len())?;
    }
    Ok(())
}

/// Writes the plan header and every task.
fn write_plan(out: &mut dyn Write, plan: &Plan) -> std::io::Result<()> {
    writeln!(out, "intent: {}", plan.intent)?;
    writeln!(out, "created: {}", plan.created_at)?;
    if plan.tasks.is_empty() {
        return writeln!(out, "no tasks");
    }
    for task in &plan.tasks {
        write_task(out, task)?;
    }
    Ok(())
}
