// crates/apiforge-guardrail/src/language/tests.rs
// ============================================================================
// Module: Source Language Unit Tests
// Description: Unit coverage for extension mapping and comment tracking.
// Purpose: Pin which files are scanned and which lines are skipped.
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

/// Tests every documented extension and a few unrecognized ones.
#[test]
fn extensions_map_to_languages() {
    let cases = [
        ("a.ts", Some(SourceLanguage::TypeScript)),
        ("a.TSX", Some(SourceLanguage::TypeScript)),
        ("a.mts", Some(SourceLanguage::TypeScript)),
        ("a.cjs", Some(SourceLanguage::JavaScript)),
        ("a.jsx", Some(SourceLanguage::JavaScript)),
        ("a.py", Some(SourceLanguage::Python)),
        ("A.java", Some(SourceLanguage::Java)),
        ("main.go", Some(SourceLanguage::Go)),
        ("lib.rs", Some(SourceLanguage::Rust)),
        ("pom.xml", None),
        ("Makefile", None),
    ];
    for (path, expected) in cases {
        assert_eq!(SourceLanguage::from_path(Path::new(path)), expected, "{path}");
    }
}

/// Tests C-family line and block comments.
#[test]
fn c_family_comments_are_tracked() {
    let mut tracker = CommentTracker::new(SourceLanguage::TypeScript);
    assert_eq!(tracker.code("  // fetch(x)"), None);
    assert_eq!(tracker.code("/* start"), None);
    assert_eq!(tracker.code("fetch(inside)"), None);
    assert_eq!(tracker.code(" * doc line"), None);
    assert_eq!(tracker.code("end */"), None);
    assert_eq!(tracker.code("fetch(after)"), Some("fetch(after)"));
    assert_eq!(tracker.code("/* one line */"), None);
    assert_eq!(tracker.code("code();"), Some("code();"));
}

/// Tests code after a closing block delimiter is still returned.
#[test]
fn code_after_block_close_is_kept() {
    let mut tracker = CommentTracker::new(SourceLanguage::TypeScript);
    assert_eq!(tracker.code("/* start"), None);
    assert_eq!(tracker.code(" */ const r = fetch(\"/x\");"), Some(" const r = fetch(\"/x\");"));
    assert_eq!(tracker.code("/* a */ b(); /* c */"), Some(" b(); /* c */"));
    assert_eq!(tracker.code("/* a */ /* b */ // c"), None);
}

/// Tests dereference lines are code outside block comments.
#[test]
fn leading_star_is_code_outside_blocks() {
    let mut rust = CommentTracker::new(SourceLanguage::Rust);
    assert_eq!(
        rust.code("    *c = reqwest::blocking::Client::new();"),
        Some("    *c = reqwest::blocking::Client::new();")
    );
    let mut go = CommentTracker::new(SourceLanguage::Go);
    assert_eq!(go.code("*p, _ = http.Get(\"x\")"), Some("*p, _ = http.Get(\"x\")"));
    assert_eq!(go.code("/**"), None);
    assert_eq!(go.code(" *p, _ = http.Get(\"x\")"), None);
    assert_eq!(go.code(" */"), None);
}

/// Tests Python uses `#` only.
#[test]
fn python_comments_use_hash() {
    let mut tracker = CommentTracker::new(SourceLanguage::Python);
    assert_eq!(tracker.code("   # requests.get(x)"), None);
    assert!(tracker.code("// not a python comment").is_some());
    assert!(tracker.code("/* nor this").is_some());
    assert_eq!(tracker.code("x = 1"), Some("x = 1"));
}
