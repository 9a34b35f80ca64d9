// crates/apiforge-guardrail/src/engine/tests.rs
// ============================================================================
// Module: Guardrail Engine Unit Tests
// Description: Unit coverage for scanning file sets and applying settings.
// Purpose: Pin comment skipping, marker exemption, and settings handling.
// Dependencies: apiforge-guardrail
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

/// Builds a default engine.
fn engine() -> GuardrailEngine {
    GuardrailEngine::new(&GuardrailSettings::default()).expect("engine")
}

/// Tests a fetch call in TypeScript is flagged with its location.
#[test]
fn fetch_in_typescript_is_flagged() {
    let violations = engine().scan_file("src/app.ts", "const a = 1;\n  await fetch(\"/pets\");\n");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule_name, "no-fetch");
    assert_eq!(violations[0].line_number, 2);
    assert_eq!(violations[0].line, "await fetch(\"/pets\");");
}

/// Tests commented calls are ignored.
#[test]
fn commented_fetch_is_ignored() {
    let source = "// fetch(\"/pets\")\n/*\nfetch(x)\n*/\n";
    assert!(engine().scan_file("src/app.ts", source).is_empty());
}

/// Tests dereference lines and code after a closing block are scanned.
#[test]
fn calls_beside_comment_syntax_are_flagged() {
    let rust = engine().scan_file("src/lib.rs", "    *c = reqwest::blocking::Client::new();\n");
    assert_eq!(rust.len(), 1);
    assert_eq!(rust[0].rule_name, "no-reqwest");
    let go = engine().scan_file("main.go", "*p, _ = http.Get(\"x\")\n");
    assert_eq!(go.len(), 1);
    assert_eq!(go[0].rule_name, "no-go-http");
    let ts = engine().scan_file("src/app.ts", "/* note\n*/ const r = fetch(\"/x\");\n");
    assert_eq!(ts.len(), 1);
    assert_eq!(ts[0].rule_name, "no-fetch");
    assert_eq!(ts[0].line_number, 2);
}

/// Tests skip patterns suppress raw URLs on base path lines.
#[test]
fn base_path_urls_are_suppressed() {
    let source = "const config = { basePath: \"https://api.example.com\" };\n";
    assert!(engine().scan_file("src/config.ts", source).is_empty());
    let flagged = engine().scan_file("src/other.ts", "const u = \"https://api.example.com\";\n");
    assert_eq!(flagged[0].rule_name, "no-raw-url");
}

/// Tests language-restricted rules never fire in other languages.
#[test]
fn axios_in_java_is_not_flagged() {
    assert!(engine().scan_file("src/App.java", "axios(\"/pets\");\n").is_empty());
}

/// Tests marked client files are exempt.
#[test]
fn marked_client_is_exempt() {
    let source = format!("// header\n// {NETWORK_CLIENT_MARKER}\nawait fetch(url);\n");
    assert!(engine().scan_file("src/api.ts", &source).is_empty());
    let late = format!("{}// {NETWORK_CLIENT_MARKER}\nawait fetch(url);\n", "\n".repeat(10));
    assert_eq!(engine().scan_file("src/api.ts", &late).len(), 1);
}

/// Tests file sets count only recognized files.
#[test]
fn scan_counts_recognized_files() {
    let mut files = BTreeMap::new();
    files.insert("main.py".to_string(), "requests.get(url)\n".to_string());
    files.insert("requirements.txt".to_string(), "requests.get(url)\n".to_string());
    let report = engine().scan(&files);
    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].file_path, "main.py");
}

/// Tests disabled rules and extra skip patterns from settings.
#[test]
fn settings_disable_rules_and_add_skips() {
    let mut settings = GuardrailSettings::default();
    settings.disabled_rules.insert("no-raw-url".to_string());
    settings.extra_skip_patterns.insert("no-fetch".to_string(), vec![r"allowed-fetch".to_string()]);
    settings.extra_skip_patterns.insert("no-such-rule".to_string(), vec!["x".to_string()]);
    let engine = GuardrailEngine::new(&settings).expect("engine");
    assert!(engine.rules().iter().all(|rule| rule.name != "no-raw-url"));
    assert!(engine.scan_file("a.ts", "fetch(u) // allowed-fetch\n").is_empty());
    assert!(engine.scan_file("a.ts", "const u = \"https://x.io\";\n").is_empty());
    assert_eq!(engine.scan_file("a.ts", "fetch(u)\n").len(), 1);
}

/// Tests invalid configured skip patterns fail engine construction.
#[test]
fn invalid_extra_skip_pattern_is_rejected() {
    let mut settings = GuardrailSettings::default();
    settings.extra_skip_patterns.insert("no-fetch".to_string(), vec!["[".to_string()]);
    assert!(matches!(GuardrailEngine::new(&settings), Err(GuardrailError::Pattern { .. })));
}
