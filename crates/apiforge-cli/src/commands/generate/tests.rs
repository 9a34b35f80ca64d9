// crates/apiforge-cli/src/commands/generate/tests.rs
// ============================================================================
// Module: Generate Command Tests
// Description: Unit tests for writing file sets and reporting violations.
// Purpose: Ensure violations are reported beside written files, not fatal.
// Dependencies: apiforge-cli, apiforge-guardrail, tempfile
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::fs;

use apiforge_guardrail::GuardrailEngine;
use apiforge_guardrail::GuardrailSettings;
use apiforge_sdk_gen::FileSet;
use tempfile::tempdir;

use super::write_and_report;

/// Builds a file set from path and content pairs.
fn file_set(entries: &[(&str, &str)]) -> FileSet {
    entries.iter().map(|(path, text)| ((*path).to_string(), (*text).to_string())).collect()
}

/// Tests violating files are still written and reported with their language.
#[test]
fn violations_are_reported_after_writing() {
    let dir = tempdir().unwrap();
    let engine = GuardrailEngine::new(&GuardrailSettings::default()).unwrap();
    let emission = vec![
        ("typescript".to_string(), file_set(&[("src/app.ts", "const r = fetch(\"/pets\");\n")])),
        ("python".to_string(), file_set(&[("main.py", "print('ok')\n")])),
    ];
    let mut out = Vec::new();
    let (artifacts, violations) =
        write_and_report(dir.path(), &emission, &engine, &mut out).unwrap();

    assert_eq!(violations, 1);
    assert_eq!(artifacts.len(), 2);
    let written = fs::read_to_string(dir.path().join("typescript/src/app.ts")).unwrap();
    assert!(written.contains("fetch"));
    assert!(dir.path().join("python/main.py").is_file());

    let output = String::from_utf8(out).unwrap();
    let wrote = output.find("typescript: wrote 1 files").unwrap();
    let flagged = output.find("typescript: generated files violate the guardrail").unwrap();
    assert!(wrote < flagged, "{output}");
    assert!(output.contains("[no-fetch]"));
    assert!(output.contains("src/app.ts:1:"));
    assert!(!output.contains("python: generated files violate"));
}

/// Tests clean emissions report no violations and list every artifact.
#[test]
fn clean_emission_reports_nothing() {
    let dir = tempdir().unwrap();
    let engine = GuardrailEngine::new(&GuardrailSettings::default()).unwrap();
    let emission = vec![(
        "go".to_string(),
        file_set(&[("go.mod", "module pets\n"), ("main.go", "package main\n")]),
    )];
    let mut out = Vec::new();
    let (artifacts, violations) =
        write_and_report(dir.path(), &emission, &engine, &mut out).unwrap();
    assert_eq!(violations, 0);
    assert_eq!(artifacts.len(), 2);
    assert!(artifacts.iter().all(|path| path.contains("go")));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("go: wrote 2 files to {}\n", dir.path().join("go").display())
    );
}
