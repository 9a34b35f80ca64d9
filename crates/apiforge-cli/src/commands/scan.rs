// crates/apiforge-cli/src/commands/scan.rs
// ============================================================================
// Module: Scan Command
// Description: Runs the guardrail over a source tree.
// Purpose: Report network calls made outside the generated client.
// Dependencies: apiforge-guardrail, clap
// ============================================================================

//! ## Overview
//! Walks a directory with the configured guardrail and prints the report as
//! text or JSON.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use apiforge_config::ApiforgeConfig;
use apiforge_guardrail::GuardrailEngine;
use clap::Args;
use clap::ValueEnum;

use super::guardrail_settings;
use crate::CliResult;
use crate::EXIT_VIOLATIONS;

/// Arguments for `apiforge scan`.
#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// Directory to scan.
    #[arg(value_name = "DIR", default_value = ".")]
    pub root: PathBuf,
    /// Report format.
    #[arg(long, value_enum, default_value_t = ScanFormat::Text)]
    pub format: ScanFormat,
    /// Exit non-zero when violations are found.
    #[arg(long)]
    pub strict: bool,
}

/// Report rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScanFormat {
    /// Violations grouped by rule.
    Text,
    /// JSON array of violations.
    Json,
}

/// Executes `apiforge scan`.
///
/// Violations are reported and only fail the command under `--strict`,
/// where the exit code is [`EXIT_VIOLATIONS`].
///
/// # Errors
///
/// Returns [`crate::CliError::Guardrail`] when rules fail to compile or the
/// tree cannot be read.
pub fn run_scan(
    config: &ApiforgeConfig,
    args: &ScanArgs,
    out: &mut dyn Write,
) -> CliResult<ExitCode> {
    let engine = GuardrailEngine::new(&guardrail_settings(&config.guardrail))?;
    let report = engine.scan_tree(&args.root)?;
    tracing::info!(
        root = %args.root.display(),
        files = report.files_scanned,
        violations = report.violations.len(),
        "scan finished"
    );
    match args.format {
        ScanFormat::Text => out.write_all(report.render_text().as_bytes())?,
        ScanFormat::Json => writeln!(out, "{}", report.to_json()?)?,
    }
    if args.strict && !report.is_clean() {
        return Ok(ExitCode::from(EXIT_VIOLATIONS));
    }
    Ok(ExitCode::SUCCESS)
}
