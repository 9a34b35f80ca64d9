// crates/apiforge-contract/src/loader.rs
// ============================================================================
// Module: Contract Loader
// Description: Reads and parses contract documents from disk or memory.
// Purpose: Produce a ContractDocument with bounded input and clear errors.
// Dependencies: serde_json, serde_yaml, tracing
// ============================================================================

//! ## Overview
//! [`load`] reads a contract file with a hard size limit and parses it as
//! JSON (`.json`) or YAML (any other extension; YAML also accepts JSON text).
//! Missing files surface as [`ContractError::NotFound`]; parser diagnostics
//! are preserved in [`ContractError::Parse`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;

use crate::ContractError;
use crate::model::ContractDocument;

// ============================================================================
// CONSTANTS: Input limits
// ============================================================================

/// Maximum contract size accepted by the loader.
pub const MAX_CONTRACT_BYTES: u64 = 8 * 1024 * 1024;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// Contract document encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractFormat {
    /// JSON text.
    Json,
    /// YAML text (a superset of JSON).
    Yaml,
}

impl ContractFormat {
    /// Chooses a format from a file name or URL path.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".json") { Self::Json } else { Self::Yaml }
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads and parses a contract document from disk.
///
/// # Errors
/// Returns [`ContractError::NotFound`] when the file is absent,
/// [`ContractError::Parse`] for malformed or oversized documents, and
/// [`ContractError::Io`] for other read failures.
pub fn load(path: impl AsRef<Path>) -> Result<ContractDocument, ContractError> {
    let path = path.as_ref();
    let bytes = read_contract_bytes(path)?;
    let text = std::str::from_utf8(&bytes)
        .map_err(|_| ContractError::Parse("contract must be utf-8".to_string()))?;
    let format = ContractFormat::from_path(&path.to_string_lossy());
    let document = parse_str(text, format)?;
    tracing::debug!(
        path = %path.display(),
        title = %document.info.title,
        paths = document.paths.len(),
        "loaded contract"
    );
    Ok(document)
}

/// Parses contract text in the given format.
///
/// # Errors
/// Returns [`ContractError::Parse`] with the parser diagnostic when the text
/// does not match the contract structure.
pub fn parse_str(text: &str, format: ContractFormat) -> Result<ContractDocument, ContractError> {
    if u64::try_from(text.len()).map_or(true, |len| len > MAX_CONTRACT_BYTES) {
        return Err(ContractError::Parse(format!("contract exceeds {MAX_CONTRACT_BYTES} bytes")));
    }
    match format {
        ContractFormat::Json => {
            serde_json::from_str(text).map_err(|err| ContractError::Parse(err.to_string()))
        }
        ContractFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|err| ContractError::Parse(err.to_string()))
        }
    }
}

/// Reads the contract with size limits to avoid memory exhaustion.
fn read_contract_bytes(path: &Path) -> Result<Vec<u8>, ContractError> {
    let file = fs::File::open(path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            ContractError::NotFound(path.to_path_buf())
        } else {
            ContractError::Io(err.to_string())
        }
    })?;
    let metadata = file.metadata().map_err(|err| ContractError::Io(err.to_string()))?;
    if metadata.is_dir() {
        return Err(ContractError::Io(format!("{} is a directory", path.display())));
    }
    if metadata.len() > MAX_CONTRACT_BYTES {
        return Err(ContractError::Parse(format!("contract exceeds {MAX_CONTRACT_BYTES} bytes")));
    }
    let mut bytes = Vec::new();
    let mut limited = file.take(MAX_CONTRACT_BYTES + 1);
    limited.read_to_end(&mut bytes).map_err(|err| ContractError::Io(err.to_string()))?;
    let size = u64::try_from(bytes.len()).map_err(|_| {
        ContractError::Parse("contract size exceeds addressable memory".to_string())
    })?;
    if size > MAX_CONTRACT_BYTES {
        return Err(ContractError::Parse(format!("contract exceeds {MAX_CONTRACT_BYTES} bytes")));
    }
    Ok(bytes)
}
