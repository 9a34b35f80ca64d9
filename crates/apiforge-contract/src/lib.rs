// crates/apiforge-contract/src/lib.rs
// ============================================================================
// Module: Contract Library
// Description: Contract model, loading, extraction, and type mapping.
// Purpose: Provide the normalized operation IR shared by every emitter.
// Dependencies: reqwest, serde, serde_json, serde_yaml, thiserror, tracing
// ============================================================================

//! ## Overview
//! `apiforge-contract` parses an OpenAPI-shaped contract document into a
//! [`ContractDocument`], flattens it into [`OperationDescriptor`] values, and
//! owns the single type-mapping table every target language projects from.
//!
//! ### Design Notes
//! - The model is lenient: unknown fields are ignored and only the structural
//!   minimum (`info.title`, a `paths` mapping) is required.
//! - Path items keep document order so extraction and emission are
//!   deterministic.
//! - Operations without an `operationId` degrade to a logged skip instead of
//!   failing the whole extraction.
//!
//! ## Index
//! - Loading: [`load`], [`parse_str`], [`ContractFormat`]
//! - Extraction: [`extract`], [`catalog`], [`OperationDescriptor`]
//! - Types: [`SemanticType`], [`map_type`], [`project`], [`ProjectionTable`]
//! - Sync: [`fetch_contract`]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod atomic;
pub mod extract;
pub mod loader;
pub mod model;
pub mod sync;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

use std::path::PathBuf;

pub use extract::OperationDescriptor;
pub use extract::OperationFilter;
pub use extract::ParamDescriptor;
pub use extract::ReturnType;
pub use extract::catalog;
pub use extract::extract;
pub use loader::ContractFormat;
pub use loader::MAX_CONTRACT_BYTES;
pub use loader::load;
pub use loader::parse_str;
pub use model::ContractDocument;
pub use model::HttpMethod;
pub use model::ParameterLocation;
pub use sync::SyncError;
pub use sync::fetch_contract;
use thiserror::Error;
pub use types::ProjectionTable;
pub use types::SemanticType;
pub use types::map_type;
pub use types::project;
pub use types::projection_table;

// ============================================================================
// CONSTANTS: Shared markers
// ============================================================================

/// Header marker carried by generated client modules.
///
/// Files whose leading lines contain this marker are the only ones allowed to
/// perform network I/O.
pub const NETWORK_CLIENT_MARKER: &str = "apiforge:network-client";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or extracting a contract.
///
/// # Invariants
/// - Variant meanings are stable for automation and tests.
#[derive(Debug, Error)]
pub enum ContractError {
    /// The contract file does not exist.
    #[error("contract not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The contract text could not be parsed into the model.
    #[error("contract parse error: {0}")]
    Parse(String),
    /// Extraction produced no usable operations.
    #[error("no operations to generate: {0}")]
    EmptyOperationSet(String),
    /// IO error while reading the contract.
    #[error("contract io error: {0}")]
    Io(String),
}
