// crates/apiforge-cli/src/commands/sync.rs
// ============================================================================
// Module: Sync Command
// Description: Refreshes the local contract from its provider.
// Purpose: Fetch, validate, and store the contract in one step.
// Dependencies: apiforge-contract, clap
// ============================================================================

//! ## Overview
//! Downloads the contract from `--url` or `contract.sync_url`, checks that it
//! parses, and replaces the local copy atomically.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use apiforge_config::ApiforgeConfig;
use apiforge_contract::fetch_contract;
use clap::Args;

use super::contract_path;
use crate::CliError;
use crate::CliResult;

/// Arguments for `apiforge sync`.
#[derive(Debug, Clone, Default, Args)]
pub struct SyncArgs {
    /// Provider URL (overrides `contract.sync_url`).
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
    /// Destination (overrides `contract.path`).
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Request timeout in milliseconds (overrides `contract.sync_timeout_ms`).
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

/// Executes `apiforge sync`.
///
/// # Errors
///
/// Returns [`CliError::Usage`] when no URL is configured and
/// [`CliError::Sync`] when the fetch fails.
pub fn run_sync(
    config: &ApiforgeConfig,
    args: &SyncArgs,
    out: &mut dyn Write,
) -> CliResult<ExitCode> {
    let url = args
        .url
        .as_deref()
        .or(config.contract.sync_url.as_deref())
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| {
            CliError::Usage("no sync url; pass --url or set contract.sync_url".to_string())
        })?;
    let timeout =
        args.timeout_ms.map_or_else(|| config.contract.sync_timeout(), Duration::from_millis);
    let destination = contract_path(config, args.output.as_deref());
    let document = fetch_contract(url, &destination, timeout)?;
    writeln!(
        out,
        "synced {} {} to {}",
        document.info.title,
        document.info.version,
        destination.display()
    )?;
    Ok(ExitCode::SUCCESS)
}
