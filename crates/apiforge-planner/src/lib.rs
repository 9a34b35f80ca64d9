// crates/apiforge-planner/src/lib.rs
// ============================================================================
// Module: Planner Library
// Description: Intent matching, task model, and plan persistence.
// Purpose: Turn a free-text request into a task over contract operations.
// Dependencies: apiforge-contract, serde, serde_json, thiserror, time, tracing
// ============================================================================

//! ## Overview
//! [`plan`] scores a free-text intent against operation descriptors with a
//! deterministic keyword table and returns either one pending [`Task`] or a
//! [`NoMatch`] carrying the operation catalog as a hint. [`PlanStore`]
//! persists tasks into a JSON [`Plan`] and applies status transitions.
//!
//! ### Design Notes
//! - Matching is keyword and substring scoring, not language understanding.
//!   The keyword table is versioned by [`ACTION_KEYWORDS_VERSION`].
//! - The planner never reads the wall clock; callers pass plan timestamps.
//!
//! ## Index
//! - Matching: [`plan`], [`PlanOutcome`], [`ACTION_KEYWORDS`]
//! - Model: [`Task`], [`TaskStatus`], [`Plan`]
//! - Persistence: [`PlanStore`]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod keywords;
pub mod matcher;
pub mod store;
pub mod task;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

use std::path::PathBuf;

pub use keywords::ACTION_KEYWORDS;
pub use keywords::ACTION_KEYWORDS_VERSION;
pub use keywords::ActionCategory;
pub use matcher::CATCH_ALL_MIN_TOKEN_LEN;
pub use matcher::NoMatch;
pub use matcher::PlanOutcome;
pub use matcher::plan;
pub use store::PlanStore;
pub use task::Plan;
pub use task::Task;
pub use task::TaskStatus;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while persisting plans or updating tasks.
///
/// An intent that matches nothing is [`PlanOutcome::NoMatch`], not an error.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The plan file does not exist.
    #[error("plan not found: {0}")]
    NotFound(PathBuf),
    /// IO error while reading or writing the plan file.
    #[error("plan io error: {0}")]
    Io(String),
    /// The plan file is not a valid plan document.
    #[error("plan json error: {0}")]
    Json(String),
    /// A plan timestamp could not be formatted or parsed as RFC 3339.
    #[error("plan timestamp error: {0}")]
    Timestamp(String),
    /// No task with the given id exists in the plan.
    #[error("unknown task: {0}")]
    UnknownTask(String),
    /// Completion was requested without written artifacts.
    #[error("task {0} completes only after its artifacts are written")]
    ArtifactsRequired(String),
    /// The requested status change moves a task backwards.
    #[error("invalid transition for {task}: {from} -> {to}")]
    InvalidTransition {
        /// Task id.
        task: String,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },
}
