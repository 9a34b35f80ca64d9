// crates/apiforge-planner/tests/plan.rs
// ============================================================================
// Module: Planning Tests
// Description: Plans intents against an extracted contract and persists them.
// Purpose: Exercise contract extraction, matching, and the plan store together.
// Dependencies: apiforge-planner, apiforge-contract, tempfile, time
// ============================================================================
//! ## Overview
//! Runs the documented planning examples end to end.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use apiforge_contract::ContractFormat;
use apiforge_contract::OperationDescriptor;
use apiforge_contract::extract;
use apiforge_contract::parse_str;
use apiforge_planner::PlanOutcome;
use apiforge_planner::PlanStore;
use apiforge_planner::TaskStatus;
use apiforge_planner::plan;
use tempfile::tempdir;
use time::OffsetDateTime;

const PETS: &str = r#"{
    "openapi": "3.0.3",
    "info": {"title": "Pet Store", "version": "1.0.0"},
    "paths": {
        "/pets": {
            "get": {"operationId": "listPets", "summary": "List all pets"},
            "post": {"operationId": "createPet", "summary": "Create a pet"}
        },
        "/pets/{id}": {
            "get": {"operationId": "getPet", "summary": "Get a pet"},
            "delete": {"operationId": "deletePet"}
        }
    }
}"#;

/// Extracts the fixture operations.
fn operations() -> Vec<OperationDescriptor> {
    let document = parse_str(PETS, ContractFormat::Json).expect("contract");
    extract(&document, None).expect("operations")
}

/// Tests the create-and-list example selects exactly the collection operations.
#[test]
fn create_and_list_all_pets() {
    let PlanOutcome::Task(task) = plan("create and list all pets", &operations()) else {
        panic!("expected a task");
    };
    assert_eq!(task.operations, vec!["listPets", "createPet"]);
    assert!(!task.operations.iter().any(|id| id == "getPet"));
}

/// Tests an unrelated intent is a no-match with the catalog attached.
#[test]
fn launch_rockets_matches_nothing() {
    let PlanOutcome::NoMatch(no_match) = plan("launch rockets", &operations()) else {
        panic!("expected no match");
    };
    for id in ["listPets", "createPet", "getPet", "deletePet"] {
        assert!(no_match.catalog.contains(id), "{id}");
    }
}

/// Tests planned tasks are persisted and completed through the store.
#[test]
fn planned_task_round_trips_through_store() {
    let dir = tempdir().expect("tempdir");
    let store = PlanStore::new(dir.path().join("apiforge-plan.json"));
    let intent = "remove a pet";
    let PlanOutcome::Task(task) = plan(intent, &operations()) else {
        panic!("expected a task");
    };
    assert_eq!(task.operations, vec!["deletePet"]);

    let stored = store.record(intent, task, OffsetDateTime::UNIX_EPOCH).expect("record");
    store.set_status(&stored.id, TaskStatus::InProgress).expect("start");
    store.complete(&stored.id, vec!["rust/src/client.rs".to_string()]).expect("complete");
    let plan = store.load().expect("load");
    assert_eq!(plan.created_at, "1970-01-01T00:00:00Z");
    assert_eq!(plan.tasks[0].status, TaskStatus::Completed);
    assert_eq!(plan.tasks[0].artifacts, vec!["rust/src/client.rs"]);
}
