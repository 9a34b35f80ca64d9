// crates/apiforge-cli/src/commands/config.rs
// ============================================================================
// Module: Config Commands
// Description: Validates configuration and prints the canonical example.
// Purpose: Surface apiforge.toml problems before other commands run.
// Dependencies: apiforge-config, clap
// ============================================================================

//! ## Overview
//! `config validate` loads and checks the resolved config file;
//! `config example` prints a documented `apiforge.toml`.

use std::io::Write;
use std::process::ExitCode;

use apiforge_config::ApiforgeConfig;
use apiforge_config::config_toml_example;
use clap::Subcommand;

use crate::CliResult;

/// `apiforge config` subcommands.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigCommand {
    /// Load and validate the configuration.
    Validate,
    /// Print a documented example `apiforge.toml`.
    Example,
}

/// Executes `apiforge config`.
///
/// Validation already happened when `config` was loaded, so `validate` only
/// reports where it came from.
///
/// # Errors
///
/// Returns [`crate::CliError::Output`] when writing fails.
pub fn run_config(
    config: &ApiforgeConfig,
    command: ConfigCommand,
    out: &mut dyn Write,
) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate => match &config.source {
            Some(path) => writeln!(out, "config ok: {}", path.display())?,
            None => writeln!(out, "config ok: defaults (no apiforge.toml found)")?,
        },
        ConfigCommand::Example => out.write_all(config_toml_example().as_bytes())?,
    }
    Ok(ExitCode::SUCCESS)
}
