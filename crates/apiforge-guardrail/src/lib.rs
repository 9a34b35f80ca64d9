// crates/apiforge-guardrail/src/lib.rs
// ============================================================================
// Module: Guardrail Library
// Description: Pattern-based scan for hand-written network calls.
// Purpose: Keep network I/O inside generated client modules.
// Dependencies: apiforge-contract, regex, serde, serde_json, thiserror, tracing, walkdir
// ============================================================================

//! ## Overview
//! The [`GuardrailEngine`] runs a fixed set of [`GuardrailRule`] values over
//! source lines. A rule is a match predicate, an optional language
//! restriction, and optional suppression predicates; all three are
//! [`LinePattern`] values so rules stay language-agnostic.
//!
//! ### Design Notes
//! - Files carrying [`NETWORK_CLIENT_MARKER`] in their first
//!   [`engine::MARKER_SCAN_LINES`] lines are exempt. The marker is not
//!   authenticated: a hand-written file that carries it opts out of the
//!   scan, so the marker is a reviewable declaration, not an enforcement
//!   boundary.
//! - Comment text is never matched; code after a closing `*/` is.
//! - Violations are data: a scan only fails with [`GuardrailError`] for bad
//!   patterns or unreadable trees.
//!
//! ## Index
//! - Engine: [`GuardrailEngine`], [`GuardrailSettings`]
//! - Rules: [`default_rules`], [`GuardrailRule`], [`LinePattern`]
//! - Reports: [`GuardrailReport`], [`Violation`]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod engine;
pub mod language;
pub mod report;
pub mod rules;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use apiforge_contract::NETWORK_CLIENT_MARKER;
pub use engine::GuardrailEngine;
pub use engine::GuardrailSettings;
pub use engine::SKIPPED_DIRS;
pub use language::SourceLanguage;
pub use report::GuardrailReport;
pub use report::Violation;
pub use rules::GuardrailRule;
pub use rules::LinePattern;
pub use rules::default_rules;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while building or running the guardrail engine.
#[derive(Debug, Error)]
pub enum GuardrailError {
    /// A rule or skip pattern is not a valid regular expression.
    #[error("invalid pattern for rule {rule}: {reason}")]
    Pattern {
        /// Rule name.
        rule: String,
        /// Regex compiler diagnostic.
        reason: String,
    },
    /// Walking or reading the scanned tree failed.
    #[error("guardrail io error: {0}")]
    Io(String),
    /// Report serialization failed.
    #[error("guardrail report error: {0}")]
    Json(String),
}
