// crates/apiforge-planner/src/store.rs
// ============================================================================
// Module: Plan Store
// Description: JSON persistence for plans with size-limited reads.
// Purpose: Record planned tasks and apply status updates on disk.
// Dependencies: apiforge-contract, serde_json, time, tracing
// ============================================================================

//! ## Overview
//! [`PlanStore`] owns one plan file. Every mutation is load, modify, and an
//! atomic save; the file is assumed not to be modified concurrently.

use std::fs;
use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use apiforge_contract::atomic::write_atomic;
use time::OffsetDateTime;

use crate::PlanError;
use crate::task::Plan;
use crate::task::Task;
use crate::task::TaskStatus;

// ============================================================================
// CONSTANTS: Limits
// ============================================================================

/// Maximum plan file size in bytes.
pub const MAX_PLAN_BYTES: u64 = 4 * 1024 * 1024;

// ============================================================================
// SECTION: Store
// ============================================================================

/// File-backed plan store.
#[derive(Debug, Clone)]
pub struct PlanStore {
    /// Plan file path.
    path: PathBuf,
}

impl PlanStore {
    /// Creates a store for `path`. Nothing is read until first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// Returns the plan file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the plan.
    ///
    /// # Errors
    /// Returns [`PlanError::NotFound`] when the file is missing,
    /// [`PlanError::Io`] on read failures or oversize files, and
    /// [`PlanError::Json`] for invalid documents.
    pub fn load(&self) -> Result<Plan, PlanError> {
        let file = fs::File::open(&self.path).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                PlanError::NotFound(self.path.clone())
            } else {
                PlanError::Io(format!("{}: {err}", self.path.display()))
            }
        })?;
        let mut bytes = Vec::new();
        file.take(MAX_PLAN_BYTES + 1)
            .read_to_end(&mut bytes)
            .map_err(|err| PlanError::Io(format!("{}: {err}", self.path.display())))?;
        if u64::try_from(bytes.len()).map_or(true, |len| len > MAX_PLAN_BYTES) {
            return Err(PlanError::Io(format!(
                "{} exceeds {MAX_PLAN_BYTES} bytes",
                self.path.display()
            )));
        }
        serde_json::from_slice(&bytes)
            .map_err(|err| PlanError::Json(format!("{}: {err}", self.path.display())))
    }

    /// Saves the plan as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`PlanError::Json`] when serialization fails and
    /// [`PlanError::Io`] when the write fails.
    pub fn save(&self, plan: &Plan) -> Result<(), PlanError> {
        let mut text =
            serde_json::to_string_pretty(plan).map_err(|err| PlanError::Json(err.to_string()))?;
        text.push('\n');
        write_atomic(&self.path, text.as_bytes())
            .map_err(|err| PlanError::Io(format!("{}: {err}", self.path.display())))?;
        tracing::info!(path = %self.path.display(), tasks = plan.tasks.len(), "saved plan");
        Ok(())
    }

    /// Appends a task, creating the plan stamped with `now` when absent.
    ///
    /// An existing plan keeps its creation time; its intent becomes `intent`.
    /// Returns the task as stored, with its assigned id.
    ///
    /// # Errors
    /// Returns any load or save error other than a missing file.
    pub fn record(&self, intent: &str, task: Task, now: OffsetDateTime) -> Result<Task, PlanError> {
        let mut plan = match self.load() {
            Ok(plan) => plan,
            Err(PlanError::NotFound(_)) => Plan::new(intent, now)?,
            Err(err) => return Err(err),
        };
        intent.clone_into(&mut plan.intent);
        let id = plan.push(task);
        self.save(&plan)?;
        plan.task(&id).cloned().ok_or(PlanError::UnknownTask(id))
    }

    /// Returns a stored task.
    ///
    /// # Errors
    /// Returns [`PlanError::UnknownTask`] plus load errors.
    pub fn task(&self, id: &str) -> Result<Task, PlanError> {
        let plan = self.load()?;
        plan.task(id).cloned().ok_or_else(|| PlanError::UnknownTask(id.to_string()))
    }

    /// Completes a stored task with the paths written for it.
    ///
    /// # Errors
    /// Returns the errors of [`Plan::complete`] plus load and save errors.
    pub fn complete(&self, id: &str, artifacts: Vec<String>) -> Result<Task, PlanError> {
        let mut plan = self.load()?;
        let task = plan.complete(id, artifacts)?.clone();
        self.save(&plan)?;
        tracing::debug!(task = id, artifacts = task.artifacts.len(), "completed task");
        Ok(task)
    }

    /// Moves a stored task to `status`.
    ///
    /// # Errors
    /// Returns [`PlanError::UnknownTask`] and [`PlanError::InvalidTransition`]
    /// from [`Plan::set_status`], plus load and save errors.
    pub fn set_status(&self, id: &str, status: TaskStatus) -> Result<Task, PlanError> {
        let mut plan = self.load()?;
        let task = plan.set_status(id, status)?.clone();
        self.save(&plan)?;
        tracing::debug!(task = id, status = %status, "updated task status");
        Ok(task)
    }
}
