// crates/apiforge-guardrail/src/report/tests.rs
// ============================================================================
// Module: Guardrail Report Unit Tests
// Description: Unit coverage for grouping and rendering.
// Purpose: Ensure every rendering derives from the same violation list.
// Dependencies: apiforge-guardrail, serde_json
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use super::*;

/// Builds a violation.
fn violation(rule: &str, path: &str, line_number: usize) -> Violation {
    Violation {
        rule_name: rule.to_string(),
        file_path: path.to_string(),
        line_number,
        message: format!("{rule} message"),
        line: "fetch(x)".to_string(),
    }
}

/// Builds a report with two rules.
fn sample() -> GuardrailReport {
    GuardrailReport {
        files_scanned: 2,
        violations: vec![
            violation("no-fetch", "a.ts", 3),
            violation("no-raw-url", "a.ts", 4),
            violation("no-fetch", "b.ts", 1),
        ],
    }
}

/// Tests grouping keeps every violation under its rule.
#[test]
fn grouped_by_rule_name() {
    let report = sample();
    let groups = report.grouped();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups["no-fetch"].len(), 2);
    assert_eq!(groups["no-raw-url"][0].line_number, 4);
    assert!(!report.is_clean());
}

/// Tests the text rendering lists locations under rule headings.
#[test]
fn text_rendering_lists_locations() {
    let text = sample().render_text();
    assert!(text.starts_with("guardrail: 3 violations in 2 files scanned"));
    assert!(text.contains("[no-fetch] no-fetch message"));
    assert!(text.contains("  b.ts:1: fetch(x)"));
    let clean = GuardrailReport { files_scanned: 4, violations: Vec::new() }.render_text();
    assert_eq!(clean, "guardrail: 4 files scanned, no violations\n");
}

/// Tests the JSON rendering uses camelCase violation fields.
#[test]
fn json_rendering_uses_camel_case() {
    let json = sample().to_json().expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
    assert_eq!(value.as_array().map(Vec::len), Some(3));
    assert_eq!(value[0]["ruleName"], "no-fetch");
    assert_eq!(value[0]["filePath"], "a.ts");
    assert_eq!(value[0]["lineNumber"], 3);
}
