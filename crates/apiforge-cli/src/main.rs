// crates/apiforge-cli/src/main.rs
// ============================================================================
// Module: Apiforge CLI Entry Point
// Description: Command dispatcher for generation, planning, and scanning.
// Purpose: Parse arguments, install logging, load config, and run commands.
// Dependencies: apiforge-cli, apiforge-config, clap, time
// ============================================================================

//! ## Overview
//! `apiforge` turns an API contract into client projects, plans intents
//! against its operations, and scans source trees for network calls that
//! bypass the generated client. Configuration is loaded once and passed to
//! the selected command; results go to stdout and diagnostics to stderr.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use apiforge_cli::CliError;
use apiforge_cli::CliResult;
use apiforge_cli::commands::config::ConfigCommand;
use apiforge_cli::commands::config::run_config;
use apiforge_cli::commands::generate::EmitArgs;
use apiforge_cli::commands::generate::GenerateArgs;
use apiforge_cli::commands::generate::run_check;
use apiforge_cli::commands::generate::run_generate;
use apiforge_cli::commands::plan::PlanArgs;
use apiforge_cli::commands::plan::StatusArgs;
use apiforge_cli::commands::plan::run_plan;
use apiforge_cli::commands::plan::run_status;
use apiforge_cli::commands::scan::ScanArgs;
use apiforge_cli::commands::scan::run_scan;
use apiforge_cli::commands::sync::SyncArgs;
use apiforge_cli::commands::sync::run_sync;
use apiforge_cli::logging::init_tracing;
use apiforge_config::ApiforgeConfig;
use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use time::OffsetDateTime;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(name = "apiforge", version, about = "Contract-driven client generation and guardrails.")]
struct Cli {
    /// Config file (overrides `APIFORGE_CONFIG` and `./apiforge.toml`).
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate client projects from the contract.
    Generate(GenerateArgs),
    /// Verify generated projects match the contract.
    Check(EmitArgs),
    /// Plan an intent into a task over contract operations.
    Plan(PlanArgs),
    /// Show the plan or update a task status.
    Status(StatusArgs),
    /// Scan a source tree for network calls outside the generated client.
    Scan(ScanArgs),
    /// Fetch the contract from its provider.
    Sync(SyncArgs),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli) {
        Ok(code) => code,
        Err(err) => emit_error(&err),
    }
}

/// Loads configuration and dispatches the selected command.
fn run(cli: Cli) -> CliResult<ExitCode> {
    let mut stdout = std::io::stdout().lock();
    if let Commands::Config {
        command: ConfigCommand::Example,
    } = cli.command
    {
        return run_config(&ApiforgeConfig::default(), ConfigCommand::Example, &mut stdout);
    }
    let config = ApiforgeConfig::load(cli.config.as_deref())?;
    if let Some(source) = &config.source {
        tracing::debug!(path = %source.display(), "loaded config");
    }
    match cli.command {
        Commands::Generate(args) => run_generate(&config, &args, &mut stdout),
        Commands::Check(args) => run_check(&config, &args, &mut stdout),
        Commands::Plan(args) => run_plan(&config, &args, OffsetDateTime::now_utc(), &mut stdout),
        Commands::Status(args) => run_status(&config, &args, &mut stdout),
        Commands::Scan(args) => run_scan(&config, &args, &mut stdout),
        Commands::Sync(args) => run_sync(&config, &args, &mut stdout),
        Commands::Config {
            command,
        } => run_config(&config, command, &mut stdout),
    }
}

/// Writes an error to stderr and returns the failure exit code.
fn emit_error(err: &CliError) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "apiforge: {err}");
    ExitCode::FAILURE
}
