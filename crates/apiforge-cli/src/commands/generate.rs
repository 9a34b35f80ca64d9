// crates/apiforge-cli/src/commands/generate.rs
// ============================================================================
// Module: Generate and Check Commands
// Description: Emits client projects per language and verifies them on disk.
// Purpose: Drive the emitter registry, guardrail gate, and output writer.
// Dependencies: apiforge-sdk-gen, apiforge-guardrail, apiforge-planner, clap
// ============================================================================

//! ## Overview
//! Languages are rendered on scoped threads against one shared operation
//! slice and each lands in `<output_dir>/<language>/`. Every file set is
//! scanned by the guardrail; violations are printed after the files are
//! written and only change the exit code under `--strict`.
//!
//! `--task` runs a planned task: its operations replace `--ops`, the task is
//! moved to `in-progress` before the first write, and to `completed` with
//! the written paths once every language is on disk.

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use apiforge_config::ApiforgeConfig;
use apiforge_contract::OperationDescriptor;
use apiforge_guardrail::GuardrailEngine;
use apiforge_planner::TaskStatus;
use apiforge_sdk_gen::EmitContext;
use apiforge_sdk_gen::EmitterRegistry;
use apiforge_sdk_gen::FileSet;
use apiforge_sdk_gen::SdkGenError;
use apiforge_sdk_gen::check_file_set;
use apiforge_sdk_gen::write_file_set;
use clap::Args;

use super::contract_path;
use super::guardrail_settings;
use super::load_operations;
use super::operation_filter;
use super::plan_store;
use crate::CliError;
use crate::CliResult;
use crate::EXIT_VIOLATIONS;

// ============================================================================
// SECTION: Arguments
// ============================================================================

/// Arguments shared by `generate` and `check`.
#[derive(Debug, Clone, Default, Args)]
pub struct EmitArgs {
    /// Contract path (overrides `contract.path`).
    #[arg(long, value_name = "FILE")]
    pub contract: Option<PathBuf>,
    /// Target language, repeatable (overrides `generate.languages`).
    #[arg(long = "lang", value_name = "LANG")]
    pub languages: Vec<String>,
    /// Output root (overrides `generate.output_dir`).
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
    /// Comma-separated operation ids to include.
    #[arg(long, value_name = "IDS", value_delimiter = ',')]
    pub ops: Vec<String>,
    /// Service name override.
    #[arg(long, value_name = "NAME")]
    pub service_name: Option<String>,
    /// Package name override.
    #[arg(long, value_name = "NAME")]
    pub package_name: Option<String>,
    /// Base URL baked into generated clients.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

/// Arguments for `apiforge generate`.
#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Contract, language, and output selection.
    #[command(flatten)]
    pub emit: EmitArgs,
    /// Planned task to execute; its operations replace `--ops`.
    #[arg(long, value_name = "TASK_ID", conflicts_with = "ops")]
    pub task: Option<String>,
    /// Plan file holding the task (overrides `plan.path`).
    #[arg(long, value_name = "FILE", requires = "task")]
    pub plan: Option<PathBuf>,
    /// Exit non-zero when generated files violate the guardrail.
    #[arg(long)]
    pub strict: bool,
}

// ============================================================================
// SECTION: Emission
// ============================================================================

/// Emitted file sets keyed by canonical language, in request order.
type Emission = Vec<(String, FileSet)>;

/// Loads the contract and renders every requested language.
///
/// Command-line languages are resolved here so unknown ids surface as
/// [`SdkGenError::UnsupportedLanguage`]; config languages are already
/// canonical.
fn emit_requested(
    config: &ApiforgeConfig,
    args: &EmitArgs,
    ops: &[String],
) -> CliResult<(PathBuf, Emission)> {
    let registry = EmitterRegistry::shared()?;
    let languages: Vec<String> = if args.languages.is_empty() {
        config.generate.languages.clone()
    } else {
        registry.canonical(&args.languages)?.into_iter().map(str::to_string).collect()
    };
    let filter = operation_filter(ops);
    let path = contract_path(config, args.contract.as_deref());
    let (document, operations) = load_operations(&path, filter.as_ref())?;
    let context = emit_context(config, args, EmitContext::from_document(&document));
    let emission = emit_all(registry, &languages, &operations, &context)?;
    let root = args.out.clone().unwrap_or_else(|| PathBuf::from(&config.generate.output_dir));
    Ok((root, emission))
}

/// Applies flag and config overrides to a derived context.
fn emit_context(config: &ApiforgeConfig, args: &EmitArgs, derived: EmitContext) -> EmitContext {
    let generate = &config.generate;
    let mut context = derived;
    if let Some(name) = args.service_name.as_deref().or(generate.service_name.as_deref()) {
        context = context.with_service_name(name);
    }
    if let Some(name) = args.package_name.as_deref().or(generate.package_name.as_deref()) {
        context = context.with_package_name(name);
    }
    if let Some(url) = args.base_url.as_deref().or(generate.base_url.as_deref()) {
        context = context.with_base_url(url);
    }
    context
}

/// Renders each language on its own scoped thread.
///
/// # Errors
///
/// Returns the first emitter error in request order, or
/// [`CliError::Worker`] when a worker panicked.
pub fn emit_all(
    registry: &EmitterRegistry,
    languages: &[String],
    operations: &[OperationDescriptor],
    context: &EmitContext,
) -> CliResult<Emission> {
    thread::scope(|scope| {
        let handles: Vec<_> = languages
            .iter()
            .map(|language| {
                let handle = scope.spawn(move || registry.emit(language, operations, context));
                (language, handle)
            })
            .collect();
        handles
            .into_iter()
            .map(|(language, handle)| -> CliResult<(String, FileSet)> {
                let files = handle.join().map_err(|_| CliError::Worker(language.clone()))??;
                Ok((language.clone(), files))
            })
            .collect()
    })
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes `apiforge generate`.
///
/// Guardrail violations in the emitted files are printed after the files
/// are written. They yield [`EXIT_VIOLATIONS`] only under `--strict`.
///
/// # Errors
///
/// Returns [`CliError`] when loading, rendering, or writing fails, and
/// [`CliError::Plan`] when `--task` names an unknown or completed task. A
/// failed write leaves the task `in-progress`.
pub fn run_generate(
    config: &ApiforgeConfig,
    args: &GenerateArgs,
    out: &mut dyn Write,
) -> CliResult<ExitCode> {
    let store = plan_store(config, args.plan.as_deref());
    let ops = match &args.task {
        Some(id) => store.task(id)?.operations,
        None => args.emit.ops.clone(),
    };
    let (root, emission) = emit_requested(config, &args.emit, &ops)?;
    let engine = GuardrailEngine::new(&guardrail_settings(&config.guardrail))?;
    if let Some(id) = &args.task {
        store.set_status(id, TaskStatus::InProgress)?;
    }
    let (artifacts, violations) = write_and_report(&root, &emission, &engine, out)?;
    if let Some(id) = &args.task {
        let task = store.complete(id, artifacts)?;
        writeln!(out, "{} is now {} ({} files)", task.id, task.status, task.artifacts.len())?;
    }
    if args.strict && violations > 0 {
        return Ok(ExitCode::from(EXIT_VIOLATIONS));
    }
    Ok(ExitCode::SUCCESS)
}

/// Writes each language under `root`, then prints its guardrail report.
///
/// Returns every written path and the total violation count.
fn write_and_report(
    root: &Path,
    emission: &Emission,
    engine: &GuardrailEngine,
    out: &mut dyn Write,
) -> CliResult<(Vec<String>, usize)> {
    let mut artifacts = Vec::new();
    let mut reports = Vec::with_capacity(emission.len());
    for (language, files) in emission {
        let target = root.join(language);
        let written = write_file_set(&target, files)?;
        writeln!(out, "{language}: wrote {} files to {}", written.len(), target.display())?;
        artifacts.extend(written.iter().map(|path| path.to_string_lossy().into_owned()));
        reports.push((language, engine.scan(files)));
    }
    let mut violations = 0;
    for (language, report) in reports.iter().filter(|(_, report)| !report.is_clean()) {
        violations += report.violations.len();
        tracing::warn!(
            language = %language,
            violations = report.violations.len(),
            "generated files violate the guardrail"
        );
        writeln!(out, "{language}: generated files violate the guardrail")?;
        out.write_all(report.render_text().as_bytes())?;
    }
    Ok((artifacts, violations))
}

/// Executes `apiforge check`.
///
/// # Errors
///
/// Returns [`CliError::SdkGen`] with [`SdkGenError::Drift`] listing every
/// language whose files differ from a fresh emission.
pub fn run_check(
    config: &ApiforgeConfig,
    args: &EmitArgs,
    out: &mut dyn Write,
) -> CliResult<ExitCode> {
    let (root, emission) = emit_requested(config, args, &args.ops)?;
    let mut drifted = Vec::new();
    for (language, files) in &emission {
        let target = root.join(language);
        match check_file_set(&target, files) {
            Ok(()) => writeln!(out, "{language}: up to date")?,
            Err(SdkGenError::Drift(detail)) => drifted.push(format!("{language}: {detail}")),
            Err(err) => return Err(err.into()),
        }
    }
    if drifted.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(SdkGenError::Drift(drifted.join("\n")).into())
    }
}

#[cfg(test)]
mod tests;
