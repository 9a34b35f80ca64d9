// crates/apiforge-cli/src/lib.rs
// ============================================================================
// Module: Apiforge CLI Library
// Description: Command implementations shared by the binary and tests.
// Purpose: Keep argument parsing in `main.rs` and behavior testable here.
// Dependencies: apiforge-*, clap, thiserror, tracing-subscriber
// ============================================================================

//! ## Overview
//! Each subcommand lives in [`commands`] as a `run` function that takes the
//! loaded configuration, its parsed arguments, and a writer for user-facing
//! output. Diagnostics go through `tracing` to stderr; results go to the
//! writer, which is stdout in the binary.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod commands;
pub mod error;
pub mod logging;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::CliError;
pub use error::CliResult;
pub use error::EXIT_NO_MATCH;
pub use error::EXIT_VIOLATIONS;
