// crates/apiforge-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and `apiforge config example`.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for apiforge configuration. The output is static and
//! parses to a valid [`crate::ApiforgeConfig`].

/// Returns a canonical example `apiforge.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"# Contract location. YAML or JSON, chosen by extension.
[contract]
path = "openapi.yaml"
# Optional provider URL used by `apiforge sync`.
sync_url = "https://api.example.com/openapi.json"
# Request timeout for sync, 100..=120000 ms.
sync_timeout_ms = 10000

# Client generation. Languages: typescript, python, go, java, rust.
[generate]
output_dir = "generated"
languages = ["typescript", "python"]
# Optional overrides; derived from the contract title when omitted.
service_name = "pets-service"
package_name = "com.example.pets"

# Persisted task plan.
[plan]
path = "apiforge-plan.json"

# Guardrail adjustments.
[guardrail]
disabled_rules = ["no-raw-url"]

[guardrail.extra_skip_patterns]
no-fetch = ["allowed-fetch"]
"#,
    )
}
