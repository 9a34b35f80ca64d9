// crates/apiforge-cli/src/commands.rs
// ============================================================================
// Module: CLI Commands
// Description: Subcommand implementations and shared contract plumbing.
// Purpose: Turn parsed arguments and config into library calls.
// Dependencies: apiforge-config, apiforge-contract, apiforge-guardrail, apiforge-planner
// ============================================================================

//! ## Overview
//! Every command resolves its inputs as "flag, else config", loads the
//! contract through [`load_operations`] when it needs one, and writes its
//! result to the supplied writer.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod generate;
pub mod plan;
pub mod scan;
pub mod sync;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use apiforge_config::ApiforgeConfig;
use apiforge_config::GuardrailConfig;
use apiforge_contract::ContractDocument;
use apiforge_contract::OperationDescriptor;
use apiforge_contract::OperationFilter;
use apiforge_guardrail::GuardrailSettings;
use apiforge_planner::PlanStore;

use crate::CliResult;

// ============================================================================
// SECTION: Shared Helpers
// ============================================================================

/// Returns the contract path from the flag or the config.
#[must_use]
pub fn contract_path(config: &ApiforgeConfig, flag: Option<&Path>) -> PathBuf {
    flag.map_or_else(|| PathBuf::from(&config.contract.path), Path::to_path_buf)
}

/// Returns the plan store from the flag or the config.
#[must_use]
pub fn plan_store(config: &ApiforgeConfig, flag: Option<&Path>) -> PlanStore {
    PlanStore::new(flag.map_or_else(|| PathBuf::from(&config.plan.path), Path::to_path_buf))
}

/// Builds an operation filter from `--ops` values; empty means no filter.
#[must_use]
pub fn operation_filter(ids: &[String]) -> Option<OperationFilter> {
    let filter: OperationFilter = ids
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    if filter.is_empty() { None } else { Some(filter) }
}

/// Loads the contract and extracts its operations.
///
/// # Errors
///
/// Returns [`crate::CliError::Contract`] when the contract cannot be loaded
/// or no operation survives the filter.
pub fn load_operations(
    path: &Path,
    filter: Option<&OperationFilter>,
) -> CliResult<(ContractDocument, Vec<OperationDescriptor>)> {
    let document = apiforge_contract::load(path)?;
    let operations = apiforge_contract::extract(&document, filter)?;
    tracing::info!(
        path = %path.display(),
        operations = operations.len(),
        "loaded contract"
    );
    Ok((document, operations))
}

/// Converts guardrail config into engine settings.
#[must_use]
pub fn guardrail_settings(config: &GuardrailConfig) -> GuardrailSettings {
    GuardrailSettings {
        disabled_rules: config.disabled_rules.iter().map(|name| name.trim().to_string()).collect(),
        extra_skip_patterns: config.extra_skip_patterns.clone(),
    }
}
