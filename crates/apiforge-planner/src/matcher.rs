// crates/apiforge-planner/src/matcher.rs
// ============================================================================
// Module: Intent Matcher
// Description: Deterministic keyword and substring scoring of intents.
// Purpose: Select the contract operations a free-text request refers to.
// Dependencies: apiforge-contract, tracing
// ============================================================================

//! ## Overview
//! An operation is selected when the intent names its entity and either asks
//! for a matching action or asks for no recognized action at all. Separately,
//! any long token found inside an operation id selects that operation. The
//! two paths are unioned; the catch-all trades precision for recall.
//!
//! ```
//! use apiforge_planner::PlanOutcome;
//! use apiforge_planner::plan;
//!
//! let outcome = plan("launch rockets", &[]);
//! assert!(matches!(outcome, PlanOutcome::NoMatch(_)));
//! ```

use std::collections::BTreeSet;

use apiforge_contract::OperationDescriptor;
use apiforge_contract::catalog;

use crate::keywords::ActionCategory;
use crate::keywords::detect_categories;
use crate::task::Task;
use crate::task::task_id;

// ============================================================================
// CONSTANTS: Matching thresholds
// ============================================================================

/// Minimum token length for the operation id catch-all.
pub const CATCH_ALL_MIN_TOKEN_LEN: usize = 4;

/// Tokens must be longer than this to count as entity names.
const ENTITY_MIN_EXCLUSIVE_LEN: usize = 2;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Result of planning an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// At least one operation matched.
    Task(Task),
    /// Nothing matched.
    NoMatch(NoMatch),
}

/// Details for an intent that matched no operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoMatch {
    /// Original intent text.
    pub intent: String,
    /// Catalog of available operations for remediation.
    pub catalog: String,
}

// ============================================================================
// SECTION: Matching
// ============================================================================

/// Plans an intent against the available operations.
///
/// A matching intent yields a pending task with id `task-1`; the plan store
/// re-numbers it on append.
#[must_use]
pub fn plan(intent: &str, operations: &[OperationDescriptor]) -> PlanOutcome {
    let tokens = tokenize(intent);
    let categories = detect_categories(&tokens);
    let mut seen = BTreeSet::new();
    let mut selected = Vec::new();
    for operation in operations {
        if !seen.contains(&operation.operation_id) && matches(operation, &tokens, &categories) {
            seen.insert(operation.operation_id.clone());
            selected.push(operation.operation_id.clone());
        }
    }
    tracing::debug!(
        tokens = tokens.len(),
        categories = ?categories,
        selected = selected.len(),
        "planned intent"
    );
    if selected.is_empty() {
        return PlanOutcome::NoMatch(NoMatch {
            intent: intent.to_string(),
            catalog: catalog(operations),
        });
    }
    PlanOutcome::Task(Task::pending(task_id(0), intent, selected))
}

/// Lower-cases and whitespace-splits an intent.
#[must_use]
pub fn tokenize(intent: &str) -> Vec<String> {
    intent.split_whitespace().map(str::to_lowercase).collect()
}

/// Returns true when `operation` satisfies either inclusion path.
fn matches(operation: &OperationDescriptor, tokens: &[String], categories: &[ActionCategory]) -> bool {
    let id = operation.operation_id.to_lowercase();
    let entity = entity_match(operation, &id, tokens);
    let action =
        categories.is_empty() || categories.iter().any(|category| category.accepts(operation));
    let catch_all = tokens
        .iter()
        .any(|token| token.chars().count() >= CATCH_ALL_MIN_TOKEN_LEN && id.contains(token.as_str()));
    (entity && action) || catch_all
}

/// Returns true when a token names the operation's entity.
fn entity_match(operation: &OperationDescriptor, id: &str, tokens: &[String]) -> bool {
    let mut haystacks = vec![id.to_string(), operation.path_template.to_lowercase()];
    if let Some(summary) = &operation.summary {
        haystacks.push(summary.to_lowercase());
    }
    haystacks.extend(operation.tags.iter().map(|tag| tag.to_lowercase()));
    tokens
        .iter()
        .filter(|token| token.chars().count() > ENTITY_MIN_EXCLUSIVE_LEN)
        .any(|token| haystacks.iter().any(|haystack| haystack.contains(token.as_str())))
}
