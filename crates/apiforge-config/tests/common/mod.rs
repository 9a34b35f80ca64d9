// crates/apiforge-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for apiforge-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use apiforge_config::ApiforgeConfig;

/// Parses a TOML string into an `ApiforgeConfig` without validating it.
pub fn config_from_toml(toml_str: &str) -> Result<ApiforgeConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<ApiforgeConfig, toml::de::Error> {
    config_from_toml("")
}
