// crates/apiforge-planner/src/task/tests.rs
// ============================================================================
// Module: Task Model Unit Tests
// Description: Unit coverage for titles, status serde, and transitions.
// Purpose: Pin the plan JSON shape and forward-only status rules.
// Dependencies: apiforge-planner, serde_json, time
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use time::OffsetDateTime;

use super::*;

/// Fixed plan creation time.
fn epoch() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("timestamp")
}

/// Tests titles are trimmed and capitalized.
#[test]
fn title_is_trimmed_and_capitalized() {
    assert_eq!(title_from_intent("  list pets  "), "List pets");
    assert_eq!(title_from_intent(""), "");
}

/// Tests long titles are cut to the limit with an ellipsis.
#[test]
fn long_titles_are_truncated() {
    let intent = "a".repeat(80);
    let title = title_from_intent(&intent);
    assert_eq!(title.chars().count(), MAX_TITLE_CHARS);
    assert!(title.ends_with("..."));
    assert!(title.starts_with('A'));
    assert_eq!(title_from_intent(&"b".repeat(60)).chars().count(), 60);
}

/// Tests statuses serialize with kebab-case names.
#[test]
fn status_serializes_kebab_case() {
    let json = serde_json::to_string(&TaskStatus::InProgress).expect("json");
    assert_eq!(json, "\"in-progress\"");
    assert_eq!(TaskStatus::parse("completed"), Some(TaskStatus::Completed));
    assert_eq!(TaskStatus::parse("done"), None);
}

/// Tests the forward-only transition table.
#[test]
fn transitions_move_forward_only() {
    use TaskStatus::Completed;
    use TaskStatus::InProgress;
    use TaskStatus::Pending;
    assert!(Pending.can_transition_to(InProgress));
    assert!(Pending.can_transition_to(Completed));
    assert!(InProgress.can_transition_to(Completed));
    assert!(Completed.can_transition_to(Completed));
    assert!(!InProgress.can_transition_to(Pending));
    assert!(!Completed.can_transition_to(InProgress));
    assert!(!Completed.can_transition_to(Pending));
}

/// Tests the plan document uses camelCase keys and RFC 3339 time.
#[test]
fn plan_json_shape() {
    let mut plan = Plan::new("list pets", epoch()).expect("plan");
    plan.push(Task::pending("ignored", "list pets", vec!["listPets".to_string()]));
    let value = serde_json::to_value(&plan).expect("json");
    assert_eq!(value["createdAt"], "2023-11-14T22:13:20Z");
    assert_eq!(value["tasks"][0]["id"], "task-1");
    assert_eq!(value["tasks"][0]["status"], "pending");
    assert_eq!(plan.created_at().expect("parse"), epoch());
}

/// Tests status updates reject unknown ids and backward moves.
#[test]
fn set_status_enforces_rules() {
    let mut plan = Plan::new("x", epoch()).expect("plan");
    let id = plan.push(Task::pending("t", "x", Vec::new()));
    assert_eq!(id, "task-1");
    plan.complete(&id, vec!["typescript/src/client.ts".to_string()]).expect("complete");
    let err = plan.set_status(&id, TaskStatus::Pending).expect_err("backwards");
    assert!(matches!(
        err,
        PlanError::InvalidTransition { from: TaskStatus::Completed, to: TaskStatus::Pending, .. }
    ));
    assert!(matches!(
        plan.set_status("task-9", TaskStatus::Completed),
        Err(PlanError::UnknownTask(ref id)) if id == "task-9"
    ));
}

/// Tests completion requires artifacts and records them.
#[test]
fn completion_requires_artifacts() {
    let mut plan = Plan::new("x", epoch()).expect("plan");
    let id = plan.push(Task::pending("t", "x", Vec::new()));
    assert!(matches!(
        plan.set_status(&id, TaskStatus::Completed),
        Err(PlanError::ArtifactsRequired(ref task)) if task == "task-1"
    ));
    assert!(matches!(plan.complete(&id, Vec::new()), Err(PlanError::ArtifactsRequired(_))));
    assert_eq!(plan.tasks[0].status, TaskStatus::Pending);

    plan.set_status(&id, TaskStatus::InProgress).expect("start");
    let done = plan.complete(&id, vec!["go/client.go".to_string()]).expect("complete");
    assert_eq!(done.status, TaskStatus::Completed);
    assert_eq!(done.artifacts, vec!["go/client.go"]);
    plan.set_status(&id, TaskStatus::Completed).expect("idempotent");

    let value = serde_json::to_value(&plan).expect("json");
    assert_eq!(value["tasks"][0]["artifacts"][0], "go/client.go");
}

/// Tests tasks without artifacts omit the field and still parse.
#[test]
fn artifacts_are_optional_in_json() {
    let mut plan = Plan::new("x", epoch()).expect("plan");
    plan.push(Task::pending("t", "x", vec!["getPet".to_string()]));
    let value = serde_json::to_value(&plan).expect("json");
    assert!(value["tasks"][0].get("artifacts").is_none());
    let parsed: Plan = serde_json::from_value(value).expect("parse");
    assert!(parsed.tasks[0].artifacts.is_empty());
}
