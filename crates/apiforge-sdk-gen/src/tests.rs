// crates/apiforge-sdk-gen/src/tests.rs
// ============================================================================
// Module: SDK Generator Unit Tests
// Description: Unit coverage for emit contexts and top-level emission.
// Purpose: Pin context derivation and override rules.
// Dependencies: apiforge-sdk-gen, apiforge-contract
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use apiforge_contract::ContractFormat;
use apiforge_contract::parse_str;

use super::*;

/// Parses a minimal contract with the given title and servers.
fn document(title: &str, servers: &str) -> ContractDocument {
    let text = format!(
        r#"{{"openapi": "3.0.3", "info": {{"title": "{title}", "version": "1.2.0"}},
            "servers": {servers}, "paths": {{}}}}"#
    );
    parse_str(&text, ContractFormat::Json).expect("contract")
}

/// Tests every derived field for a typical contract.
#[test]
fn context_is_derived_from_document() {
    let context =
        EmitContext::from_document(&document("Pet Store", r#"[{"url": "https://pets.io/v1/"}]"#));
    assert_eq!(context.title, "Pet Store");
    assert_eq!(context.version, "1.2.0");
    assert_eq!(context.service_name, "pet-store");
    assert_eq!(context.package_name, "com.example.petstore");
    assert_eq!(context.base_url, "https://pets.io/v1");
    assert_eq!(context.api_class_name, "PetStoreApi");
}

/// Tests defaults apply when the title has no words and no server exists.
#[test]
fn context_falls_back_to_defaults() {
    let context = EmitContext::from_document(&document("***", "[]"));
    assert_eq!(context.service_name, DEFAULT_SERVICE_NAME);
    assert_eq!(context.package_name, "com.example.apiclient");
    assert_eq!(context.base_url, DEFAULT_BASE_URL);
    assert_eq!(context.api_class_name, "Api");
}

/// Tests quotes in the title cannot break out of generated literals.
#[test]
fn context_sanitizes_title() {
    let context = EmitContext::from_document(&document(r#"Evil \" Api"#, "[]"));
    assert!(!context.title.contains('"'));
    assert!(!context.title.contains('\\'));
}

/// Tests overrides replace derived values and blank overrides are ignored.
#[test]
fn overrides_apply_and_blank_overrides_are_ignored() {
    let base = EmitContext::from_document(&document("Pet Store", "[]"));
    let renamed = base.clone().with_service_name("Zoo Keeper");
    assert_eq!(renamed.service_name, "zoo-keeper");
    assert_eq!(renamed.package_name, "com.example.zookeeper");

    let packaged = renamed.with_package_name("org.Acme.Pets").with_base_url("http://h:1/");
    assert_eq!(packaged.package_name, "org.acme.pets");
    assert_eq!(packaged.base_url, "http://h:1");

    let unchanged = base.clone().with_service_name("  ").with_package_name("..").with_base_url("");
    assert_eq!(unchanged, base);
}

/// Tests unknown languages surface as unsupported.
#[test]
fn emit_rejects_unknown_language() {
    let context = EmitContext::from_document(&document("Pet Store", "[]"));
    let err = emit(&[], "cobol", &context).expect_err("unsupported");
    assert!(matches!(err, SdkGenError::UnsupportedLanguage(ref lang) if lang == "cobol"));
}
