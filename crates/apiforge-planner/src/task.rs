// crates/apiforge-planner/src/task.rs
// ============================================================================
// Module: Task Model
// Description: Task, task status, and the persisted plan document.
// Purpose: Define the plan JSON shape and legal status transitions.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! A [`Plan`] is the JSON document written by [`crate::PlanStore`]. Each
//! [`Task`] names the operations it covers and moves forward through
//! [`TaskStatus`]; backward moves are rejected. `completed` is reachable only
//! through [`Plan::complete`], which records the written artifact paths.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::PlanError;

// ============================================================================
// CONSTANTS: Titles
// ============================================================================

/// Maximum title length in characters, including the ellipsis.
pub const MAX_TITLE_CHARS: usize = 60;

/// Suffix appended to truncated titles.
const ELLIPSIS: &str = "...";

// ============================================================================
// SECTION: Task Status
// ============================================================================

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started.
    Pending,
    /// Artifacts are being produced.
    InProgress,
    /// Artifacts were written.
    Completed,
}

impl TaskStatus {
    /// Returns the serialized status name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Parses a serialized status name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Returns true when a task may move from `self` to `next`.
    ///
    /// Re-applying the current status is allowed so updates are idempotent.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, _)
                | (Self::InProgress, Self::InProgress | Self::Completed)
                | (Self::Completed, Self::Completed)
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Task
// ============================================================================

/// One unit of work over a set of operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Plan-local id (`task-N`).
    pub id: String,
    /// Short title derived from the intent.
    pub title: String,
    /// Full intent text.
    pub description: String,
    /// Lifecycle state.
    pub status: TaskStatus,
    /// Covered operation ids in document order.
    pub operations: Vec<String>,
    /// Files written when the task completed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<String>,
}

impl Task {
    /// Builds a pending task for an intent.
    #[must_use]
    pub fn pending(id: impl Into<String>, intent: &str, operations: Vec<String>) -> Self {
        Self {
            id: id.into(),
            title: title_from_intent(intent),
            description: intent.to_string(),
            status: TaskStatus::Pending,
            operations,
            artifacts: Vec::new(),
        }
    }
}

/// Derives a task title: trimmed, first letter upper-cased, and truncated.
#[must_use]
pub fn title_from_intent(intent: &str) -> String {
    let trimmed = intent.trim();
    let mut chars = trimmed.chars();
    let mut title: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    if title.chars().count() > MAX_TITLE_CHARS {
        title = title.chars().take(MAX_TITLE_CHARS - ELLIPSIS.len()).collect::<String>();
        title.truncate(title.trim_end().len());
        title.push_str(ELLIPSIS);
    }
    title
}

/// Returns the plan-local id for the task at a 0-based position.
#[must_use]
pub fn task_id(index: usize) -> String {
    format!("task-{}", index + 1)
}

// ============================================================================
// SECTION: Plan
// ============================================================================

/// Persisted plan document.
///
/// # Invariants
/// - `created_at` is an RFC 3339 timestamp fixed when the plan is created.
/// - Task ids are `task-N` with `N` the 1-based position in `tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Most recent intent recorded in the plan.
    pub intent: String,
    /// Creation time (RFC 3339).
    pub created_at: String,
    /// Tasks in creation order.
    pub tasks: Vec<Task>,
}

impl Plan {
    /// Creates an empty plan stamped with `created_at`.
    ///
    /// # Errors
    /// Returns [`PlanError::Timestamp`] when the time cannot be rendered as
    /// RFC 3339.
    pub fn new(intent: &str, created_at: OffsetDateTime) -> Result<Self, PlanError> {
        let created_at =
            created_at.format(&Rfc3339).map_err(|err| PlanError::Timestamp(err.to_string()))?;
        Ok(Self {
            intent: intent.to_string(),
            created_at,
            tasks: Vec::new(),
        })
    }

    /// Parses the creation timestamp.
    ///
    /// # Errors
    /// Returns [`PlanError::Timestamp`] when `created_at` is not RFC 3339.
    pub fn created_at(&self) -> Result<OffsetDateTime, PlanError> {
        OffsetDateTime::parse(&self.created_at, &Rfc3339)
            .map_err(|err| PlanError::Timestamp(format!("{}: {err}", self.created_at)))
    }

    /// Appends a task under the next id, returning the assigned id.
    pub fn push(&mut self, mut task: Task) -> String {
        task.id = task_id(self.tasks.len());
        let id = task.id.clone();
        self.tasks.push(task);
        id
    }

    /// Returns the task with the given id.
    #[must_use]
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Moves a task to `status`.
    ///
    /// Completing a task needs its artifacts; use [`Plan::complete`].
    ///
    /// # Errors
    /// Returns [`PlanError::UnknownTask`] for unknown ids,
    /// [`PlanError::InvalidTransition`] for backward moves, and
    /// [`PlanError::ArtifactsRequired`] when `status` would newly complete
    /// the task.
    pub fn set_status(&mut self, id: &str, status: TaskStatus) -> Result<&Task, PlanError> {
        let task = self.transition(id, status)?;
        if status == TaskStatus::Completed && task.status != TaskStatus::Completed {
            return Err(PlanError::ArtifactsRequired(id.to_string()));
        }
        task.status = status;
        Ok(task)
    }

    /// Marks a task completed with the paths written for it.
    ///
    /// # Errors
    /// Returns [`PlanError::ArtifactsRequired`] when `artifacts` is empty,
    /// plus the errors of [`Plan::set_status`] for the move itself.
    pub fn complete(&mut self, id: &str, artifacts: Vec<String>) -> Result<&Task, PlanError> {
        if artifacts.is_empty() {
            return Err(PlanError::ArtifactsRequired(id.to_string()));
        }
        let task = self.transition(id, TaskStatus::Completed)?;
        task.status = TaskStatus::Completed;
        task.artifacts = artifacts;
        Ok(task)
    }

    /// Finds a task and checks that it may move to `status`.
    fn transition(&mut self, id: &str, status: TaskStatus) -> Result<&mut Task, PlanError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| PlanError::UnknownTask(id.to_string()))?;
        if !task.status.can_transition_to(status) {
            return Err(PlanError::InvalidTransition {
                task: id.to_string(),
                from: task.status,
                to: status,
            });
        }
        Ok(task)
    }
}

#[cfg(test)]
mod tests;
