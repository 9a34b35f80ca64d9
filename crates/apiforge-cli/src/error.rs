// crates/apiforge-cli/src/error.rs
// ============================================================================
// Module: CLI Errors
// Description: Error wrapper over every crate the CLI drives.
// Purpose: Map failures to messages and define outcome exit codes.
// Dependencies: thiserror
// ============================================================================

use apiforge_config::ConfigError;
use apiforge_contract::ContractError;
use apiforge_contract::SyncError;
use apiforge_guardrail::GuardrailError;
use apiforge_planner::PlanError;
use apiforge_sdk_gen::SdkGenError;
use thiserror::Error;

// ============================================================================
// CONSTANTS: Exit codes
// ============================================================================

/// Exit code when a planning intent matched no operation.
pub const EXIT_NO_MATCH: u8 = 2;

/// Exit code when the guardrail found violations under `--strict`.
pub const EXIT_VIOLATIONS: u8 = 3;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI failure; every variant exits with [`std::process::ExitCode::FAILURE`].
///
/// [`EXIT_NO_MATCH`] and [`EXIT_VIOLATIONS`] are outcomes returned by the
/// commands themselves, not errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration failed to load or validate.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Contract failed to load or yielded no operations.
    #[error(transparent)]
    Contract(#[from] ContractError),
    /// Contract sync failed.
    #[error(transparent)]
    Sync(#[from] SyncError),
    /// Generation, writing, or drift checking failed.
    #[error(transparent)]
    SdkGen(#[from] SdkGenError),
    /// Plan persistence or a status change failed.
    #[error(transparent)]
    Plan(#[from] PlanError),
    /// Guardrail rules failed to build or a scan failed.
    #[error(transparent)]
    Guardrail(#[from] GuardrailError),
    /// A generation worker panicked.
    #[error("generation worker for {0} panicked")]
    Worker(String),
    /// Arguments are missing or inconsistent.
    #[error("{0}")]
    Usage(String),
    /// Writing user-facing output failed.
    #[error("failed to write output: {0}")]
    Output(String),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Output(err.to_string())
    }
}

/// CLI result alias for fallible operations.
pub type CliResult<T> = Result<T, CliError>;
