// crates/apiforge-guardrail/tests/scan_tree.rs
// ============================================================================
// Module: Guardrail Tree Scan Tests
// Description: Directory scans over hand-written and generated sources.
// Purpose: Validate skipped directories, relative paths, and generated output.
// Dependencies: apiforge-guardrail, apiforge-contract, apiforge-sdk-gen, tempfile
// ============================================================================
//! ## Overview
//! Builds small trees on disk and checks the violations a scan reports.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::fs;
use std::path::Path;

use apiforge_contract::ContractFormat;
use apiforge_contract::extract;
use apiforge_contract::parse_str;
use apiforge_guardrail::GuardrailEngine;
use apiforge_guardrail::GuardrailSettings;
use apiforge_sdk_gen::EmitContext;
use apiforge_sdk_gen::emit;
use apiforge_sdk_gen::write_file_set;
use tempfile::tempdir;

/// Writes `contents` at `relative` under `root`.
fn put(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, contents).expect("write");
}

/// Tests skipped directories are not scanned and paths are relative.
#[test]
fn tree_scan_skips_vendor_directories() {
    let dir = tempdir().expect("tempdir");
    put(dir.path(), "src/app.ts", "await fetch(\"/pets\");\n");
    put(dir.path(), "node_modules/lib/index.js", "fetch(\"/x\");\n");
    put(dir.path(), "target/debug/build.rs", "reqwest::get(u);\n");
    put(dir.path(), "src/notes.md", "fetch(\"/x\")\n");

    let engine = GuardrailEngine::new(&GuardrailSettings::default()).expect("engine");
    let report = engine.scan_tree(dir.path()).expect("scan");
    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].file_path, "src/app.ts");
}

/// Tests a missing root surfaces as an IO error.
#[test]
fn missing_root_is_io_error() {
    let dir = tempdir().expect("tempdir");
    let engine = GuardrailEngine::new(&GuardrailSettings::default()).expect("engine");
    assert!(engine.scan_tree(&dir.path().join("absent")).is_err());
}

/// Tests every generated project passes the default guardrail.
#[test]
fn generated_projects_are_clean() {
    let contract = r#"{
        "openapi": "3.0.3",
        "info": {"title": "Pet Store", "version": "1.0.0"},
        "servers": [{"url": "https://pets.example.test"}],
        "paths": {
            "/pets": {"get": {"operationId": "listPets", "parameters": [
                {"name": "limit", "in": "query", "schema": {"type": "integer"}}
            ]}},
            "/pets/{id}": {"delete": {"operationId": "deletePet", "parameters": [
                {"name": "id", "in": "path", "required": true, "schema": {"type": "string"}}
            ]}}
        }
    }"#;
    let document = parse_str(contract, ContractFormat::Json).expect("contract");
    let operations = extract(&document, None).expect("operations");
    let context = EmitContext::from_document(&document);
    let engine = GuardrailEngine::new(&GuardrailSettings::default()).expect("engine");
    for language in ["typescript", "python", "go", "java", "rust"] {
        let files = emit(&operations, language, &context).expect("emit");
        let report = engine.scan(&files);
        assert!(report.is_clean(), "{language}: {}", report.render_text());

        let dir = tempdir().expect("tempdir");
        write_file_set(dir.path(), &files).expect("write");
        assert!(engine.scan_tree(dir.path()).expect("scan").is_clean(), "{language}");
    }
}
