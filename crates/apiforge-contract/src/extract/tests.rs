// crates/apiforge-contract/src/extract/tests.rs
// ============================================================================
// Module: Operation Extractor Unit Tests
// Description: Unit coverage for descriptor extraction and filtering.
// Purpose: Pin ordering, filtering, skipping, and return type resolution.
// Dependencies: apiforge-contract, proptest, serde_json
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use proptest::prelude::*;
use serde_json::Value;
use serde_json::json;

use super::*;
use crate::loader::ContractFormat;
use crate::loader::parse_str;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Parses a JSON value into a contract document.
fn document(value: &Value) -> Result<ContractDocument, ContractError> {
    parse_str(&value.to_string(), ContractFormat::Json)
}

/// Pet store contract used across extractor tests.
fn pets() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {"title": "Pet Store", "version": "1.0.0"},
        "paths": {
            "/pets": {
                "get": {
                    "operationId": "listPets",
                    "summary": "List all pets",
                    "parameters": [
                        {"name": "limit", "in": "query", "schema": {"type": "integer"}},
                        {"name": "tag", "in": "query", "schema": {"type": "string"}}
                    ],
                    "responses": {"200": {"content": {"application/json": {
                        "schema": {"type": "array", "items": {"$ref": "#/components/schemas/Pet"}}
                    }}}}
                },
                "post": {
                    "operationId": "createPet",
                    "requestBody": {"content": {"application/json": {
                        "schema": {"$ref": "#/components/schemas/NewPet"}
                    }}},
                    "responses": {"201": {"content": {"application/json": {
                        "schema": {"$ref": "#/components/schemas/Pet"}
                    }}}}
                }
            },
            "/pets/{id}": {
                "parameters": [
                    {"name": "id", "in": "path", "schema": {"type": "string"}}
                ],
                "get": {
                    "operationId": "getPet",
                    "responses": {
                        "200": {"content": {"application/json": {
                            "schema": {"$ref": "#/components/schemas/Pet"}
                        }}},
                        "404": {"description": "missing"}
                    }
                },
                "delete": {
                    "operationId": "deletePet",
                    "responses": {"204": {"description": "gone"}}
                },
                "patch": {
                    "summary": "no id, skipped",
                    "responses": {}
                }
            }
        }
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Tests extracts in document and canonical verb order.
#[test]
fn extracts_in_document_and_canonical_verb_order() -> Result<(), ContractError> {
    let document = document(&pets())?;
    let ids: Vec<String> =
        extract(&document, None)?.into_iter().map(|op| op.operation_id).collect();
    assert_eq!(ids, vec!["listPets", "createPet", "getPet", "deletePet"]);
    Ok(())
}

/// Tests filter keeps document order not filter order.
#[test]
fn filter_keeps_document_order_not_filter_order() -> Result<(), ContractError> {
    let document = document(&pets())?;
    let filter: OperationFilter =
        ["deletePet", "listPets", "unknownOp"].iter().map(ToString::to_string).collect();
    let ids: Vec<String> =
        extract(&document, Some(&filter))?.into_iter().map(|op| op.operation_id).collect();
    assert_eq!(ids, vec!["listPets", "deletePet"]);
    Ok(())
}

/// Tests empty filter result is an error.
#[test]
fn empty_filter_result_is_an_error() -> Result<(), ContractError> {
    let document = document(&pets())?;
    let filter: OperationFilter = std::iter::once("nothing".to_string()).collect();
    let result = extract(&document, Some(&filter));
    assert!(matches!(result, Err(ContractError::EmptyOperationSet(reason)) if reason.contains("nothing")));
    Ok(())
}

/// Tests contract without ids is an empty set.
#[test]
fn contract_without_ids_is_an_empty_set() -> Result<(), ContractError> {
    let document = document(&json!({
        "info": {"title": "Anonymous"},
        "paths": {"/x": {"get": {"summary": "no id"}}}
    }))?;
    assert!(matches!(extract(&document, None), Err(ContractError::EmptyOperationSet(_))));
    Ok(())
}

/// Tests return types follow json response rules.
#[test]
fn return_types_follow_json_response_rules() -> Result<(), ContractError> {
    let document = document(&pets())?;
    let operations = extract(&document, None)?;
    let by_id = |id: &str| operations.iter().find(|op| op.operation_id == id).cloned();
    assert_eq!(by_id("listPets").map(|op| op.return_type), Some(ReturnType::Untyped));
    assert_eq!(
        by_id("createPet").map(|op| op.return_type),
        Some(ReturnType::Named("Pet".to_string()))
    );
    assert_eq!(
        by_id("getPet").map(|op| op.return_type),
        Some(ReturnType::Named("Pet".to_string()))
    );
    assert_eq!(by_id("deletePet").map(|op| op.return_type), Some(ReturnType::Void));
    Ok(())
}

/// Tests json body without schema falls back to untyped.
#[test]
fn json_body_without_schema_falls_back_to_untyped() -> Result<(), ContractError> {
    let document = document(&json!({
        "info": {"title": "Loose"},
        "paths": {"/raw": {"get": {
            "operationId": "getRaw",
            "responses": {"200": {"content": {"application/problem+json": {}}}}
        }}}
    }))?;
    let operations = extract(&document, None)?;
    assert_eq!(operations[0].return_type, ReturnType::Untyped);
    Ok(())
}

/// Tests non json success is void.
#[test]
fn non_json_success_is_void() -> Result<(), ContractError> {
    let document = document(&json!({
        "info": {"title": "Text"},
        "paths": {"/ping": {"get": {
            "operationId": "ping",
            "responses": {"200": {"content": {"text/plain": {"schema": {"type": "string"}}}}}
        }}}
    }))?;
    assert_eq!(extract(&document, None)?[0].return_type, ReturnType::Void);
    Ok(())
}

/// Tests path level parameters merge and are required.
#[test]
fn path_level_parameters_merge_and_are_required() -> Result<(), ContractError> {
    let document = document(&pets())?;
    let operations = extract(&document, None)?;
    let get_pet = operations
        .iter()
        .find(|op| op.operation_id == "getPet")
        .ok_or_else(|| ContractError::Parse("getPet missing".into()))?;
    let path_params: Vec<&ParamDescriptor> = get_pet.params_in(ParameterLocation::Path).collect();
    assert_eq!(path_params.len(), 1);
    assert_eq!(path_params[0].name, "id");
    assert!(path_params[0].required);
    assert!(!get_pet.is_collection_path());
    Ok(())
}

/// Tests operation parameters override shared ones.
#[test]
fn operation_parameters_override_shared_ones() -> Result<(), ContractError> {
    let document = document(&json!({
        "info": {"title": "Override"},
        "paths": {"/items/{id}": {
            "parameters": [{"name": "id", "in": "path", "schema": {"type": "string"}}],
            "get": {
                "operationId": "getItem",
                "parameters": [{"name": "id", "in": "path", "schema": {"type": "integer"}}]
            }
        }}
    }))?;
    let operations = extract(&document, None)?;
    assert_eq!(operations[0].params.len(), 1);
    assert_eq!(operations[0].params[0].semantic_type, SemanticType::Number);
    Ok(())
}

/// Tests body presence and type are recorded.
#[test]
fn body_presence_and_type_are_recorded() -> Result<(), ContractError> {
    let document = document(&pets())?;
    let operations = extract(&document, None)?;
    let create = &operations[1];
    assert!(create.has_body);
    assert_eq!(create.body_type, Some(SemanticType::Named("NewPet".to_string())));
    assert!(!operations[0].has_body);
    Ok(())
}

/// Tests catalog lists every operation.
#[test]
fn catalog_lists_every_operation() -> Result<(), ContractError> {
    let document = document(&pets())?;
    let operations = extract(&document, None)?;
    let rendered = catalog(&operations);
    assert_eq!(rendered.lines().count(), 4);
    assert!(rendered.contains("GET    /pets listPets: List all pets"));
    assert!(rendered.contains("DELETE /pets/{id} deletePet"));
    Ok(())
}

// ============================================================================
// SECTION: Properties
// ============================================================================

/// Builds a contract with one GET operation per generated identifier.
fn generated_contract(ids: &[String]) -> Value {
    let mut paths = serde_json::Map::new();
    for id in ids {
        paths.insert(format!("/{id}"), json!({"get": {"operationId": id}}));
    }
    json!({"info": {"title": "Generated"}, "paths": Value::Object(paths)})
}

proptest! {
    /// Tests extraction counts match contract and filter.
    #[test]
    fn extraction_counts_match_contract_and_filter(
        ids in proptest::collection::btree_set("[a-z]{3,10}", 1..12),
        keep in proptest::collection::vec(any::<bool>(), 12),
    ) {
        let ids: Vec<String> = ids.into_iter().collect();
        let document = document(&generated_contract(&ids))
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let all = extract(&document, None).map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert_eq!(all.len(), ids.len());

        let filter: OperationFilter = ids
            .iter()
            .zip(keep.iter())
            .filter(|(_, keep)| **keep)
            .map(|(id, _)| id.clone())
            .chain(std::iter::once("zz-not-present".to_string()))
            .collect();
        let expected: Vec<&String> = ids.iter().filter(|id| filter.contains(*id)).collect();
        match extract(&document, Some(&filter)) {
            Ok(filtered) => {
                let got: Vec<&String> = filtered.iter().map(|op| &op.operation_id).collect();
                prop_assert_eq!(got, expected);
            }
            Err(ContractError::EmptyOperationSet(_)) => prop_assert!(expected.is_empty()),
            Err(other) => return Err(TestCaseError::fail(other.to_string())),
        }
    }
}
