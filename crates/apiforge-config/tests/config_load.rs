//! Config file loading tests for apiforge-config.
// crates/apiforge-config/tests/config_load.rs
// =============================================================================
// Module: Config Load Tests
// Description: Validate file resolution, size limits, and encoding checks.
// Purpose: Ensure config loading fails closed on bad input files.
// =============================================================================

use std::fs;

use apiforge_config::ApiforgeConfig;
use apiforge_config::ConfigError;

type TestResult = Result<(), String>;

#[test]
fn explicit_path_loads_and_records_source() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("apiforge.toml");
    fs::write(&path, "[generate]\nlanguages = [\"java\"]\n").map_err(|err| err.to_string())?;
    let config = ApiforgeConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    if config.generate.languages != ["java"] {
        return Err(format!("unexpected languages {:?}", config.generate.languages));
    }
    if config.source.as_deref() != Some(path.as_path()) {
        return Err("source path not recorded".to_string());
    }
    Ok(())
}

#[test]
fn explicit_missing_path_is_io_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    match ApiforgeConfig::load(Some(&path)) {
        Err(ConfigError::Io(message)) if message.contains("absent.toml") => Ok(()),
        other => Err(format!("expected io error, got {other:?}")),
    }
}

#[test]
fn oversized_file_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("big.toml");
    let padding = format!("# {}\n", "x".repeat(1024 * 1024));
    fs::write(&path, padding).map_err(|err| err.to_string())?;
    match ApiforgeConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("size limit") => Ok(()),
        other => Err(format!("expected size error, got {other:?}")),
    }
}

#[test]
fn non_utf8_file_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("bad.toml");
    fs::write(&path, [0xff, 0xfe, 0x00]).map_err(|err| err.to_string())?;
    match ApiforgeConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("utf-8") => Ok(()),
        other => Err(format!("expected utf-8 error, got {other:?}")),
    }
}

#[test]
fn invalid_values_fail_on_load() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("apiforge.toml");
    fs::write(&path, "[contract]\nsync_timeout_ms = 5\n").map_err(|err| err.to_string())?;
    match ApiforgeConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("sync_timeout_ms") => Ok(()),
        other => Err(format!("expected invalid config, got {other:?}")),
    }
}
