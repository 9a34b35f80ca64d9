// crates/apiforge-contract/src/types/tests.rs
// ============================================================================
// Module: Type Mapper Unit Tests
// Description: Unit coverage for schema mapping and language projections.
// Purpose: Keep every projection table consistent with the semantic model.
// Dependencies: apiforge-contract, serde_json
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::collections::BTreeSet;

use serde_json::json;

use super::*;

/// Tests scalar schemas map to semantic scalars.
#[test]
fn scalar_schemas_map_to_semantic_scalars() {
    assert_eq!(map_type(&json!({"type": "string"})), SemanticType::String);
    assert_eq!(map_type(&json!({"type": "integer", "format": "int64"})), SemanticType::Number);
    assert_eq!(map_type(&json!({"type": "number"})), SemanticType::Number);
    assert_eq!(map_type(&json!({"type": "boolean"})), SemanticType::Boolean);
}

/// Tests ref resolves to trailing segment.
#[test]
fn ref_resolves_to_trailing_segment() {
    let ty = map_type(&json!({"$ref": "#/components/schemas/Pet"}));
    assert_eq!(ty, SemanticType::Named("Pet".to_string()));
}

/// Tests ref names are sanitized to identifiers.
#[test]
fn ref_names_are_sanitized_to_identifiers() {
    let ty = map_type(&json!({"$ref": "#/components/schemas/Pet.v1"}));
    assert_eq!(ty, SemanticType::Named("Petv1".to_string()));
    assert_eq!(map_type(&json!({"$ref": "#/components/schemas/1Pet"})), SemanticType::Unknown);
}

/// Tests arrays wrap item types.
#[test]
fn arrays_wrap_item_types() {
    let ty = map_type(&json!({"type": "array", "items": {"$ref": "#/components/schemas/Pet"}}));
    assert_eq!(ty, SemanticType::Array(Box::new(SemanticType::Named("Pet".to_string()))));
    let untyped = map_type(&json!({"type": "array"}));
    assert_eq!(untyped, SemanticType::Array(Box::new(SemanticType::Unknown)));
}

/// Tests unknown shapes fall back without failing.
#[test]
fn unknown_shapes_fall_back_without_failing() {
    assert_eq!(map_type(&json!({"oneOf": [{"type": "string"}]})), SemanticType::Unknown);
    assert_eq!(map_type(&json!("not a schema")), SemanticType::Unknown);
    for table in PROJECTIONS {
        assert_eq!(project(&SemanticType::Unknown, table), table.fallback);
    }
}

/// Tests projections render nested arrays.
#[test]
fn projections_render_nested_arrays() {
    let ty = SemanticType::Array(Box::new(SemanticType::Array(Box::new(SemanticType::Number))));
    assert_eq!(project(&ty, &TYPESCRIPT), "Array<Array<number>>");
    assert_eq!(project(&ty, &PYTHON), "List[List[float]]");
    assert_eq!(project(&ty, &GO), "[][]float64");
    assert_eq!(project(&ty, &JAVA), "List<List<Double>>");
    assert_eq!(project(&ty, &RUST), "Vec<Vec<f64>>");
}

/// Tests named types follow table policy.
#[test]
fn named_types_follow_table_policy() {
    let named = SemanticType::Named("Pet".to_string());
    assert_eq!(project(&named, &TYPESCRIPT), "Pet");
    assert_eq!(project(&named, &JAVA), "JsonNode");
}

/// Tests every table is reachable by language id.
#[test]
fn every_table_is_reachable_by_language_id() {
    for table in PROJECTIONS {
        assert_eq!(projection_table(table.language), Some(table));
    }
    assert!(projection_table("cobol").is_none());
}

/// Tests collect named walks arrays.
#[test]
fn collect_named_walks_arrays() {
    let ty = SemanticType::Array(Box::new(SemanticType::Named("Pet".to_string())));
    let mut names = BTreeSet::new();
    ty.collect_named(&mut names);
    assert!(names.contains("Pet"));
    assert_eq!(names.len(), 1);
}
