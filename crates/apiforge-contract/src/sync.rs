// crates/apiforge-contract/src/sync.rs
// ============================================================================
// Module: Contract Sync
// Description: Fetches a contract document over HTTP and stores it locally.
// Purpose: Refresh the local contract from a running provider.
// Dependencies: reqwest, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`fetch_contract`] performs a single blocking GET with no retry. Any
//! status other than 200, and any transport failure, is terminal and is
//! reported with the failing URL. The body is size-limited, parsed to make
//! sure it is a usable contract, and only then written atomically.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use thiserror::Error;

use crate::ContractError;
use crate::atomic::write_atomic;
use crate::loader::ContractFormat;
use crate::loader::MAX_CONTRACT_BYTES;
use crate::loader::parse_str;
use crate::model::ContractDocument;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while syncing a contract.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The URL is malformed or not http(s).
    #[error("invalid contract url {url}: {reason}")]
    InvalidUrl {
        /// Offending URL.
        url: String,
        /// Reason the URL was rejected.
        reason: String,
    },
    /// The server answered with a non-200 status.
    #[error("contract fetch from {url} failed with status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code returned.
        status: u16,
    },
    /// The request failed before a response arrived.
    #[error("contract fetch from {url} failed: {cause}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        cause: String,
    },
    /// The response body exceeded the contract size limit.
    #[error("contract fetched from {url} exceeds {MAX_CONTRACT_BYTES} bytes")]
    TooLarge {
        /// Requested URL.
        url: String,
    },
    /// The fetched body is not a usable contract.
    #[error("contract fetched from {url} is invalid: {source}")]
    Contract {
        /// Requested URL.
        url: String,
        /// Parse failure.
        #[source]
        source: ContractError,
    },
    /// Writing the contract to disk failed.
    #[error("failed to write contract to {path}: {cause}")]
    Io {
        /// Destination path.
        path: String,
        /// Underlying IO error.
        cause: String,
    },
}

// ============================================================================
// SECTION: Fetch
// ============================================================================

/// Fetches a contract from `url` and writes it to `destination`.
///
/// # Errors
/// Returns [`SyncError`] for invalid URLs, non-200 responses, transport
/// failures, oversized or unparsable bodies, and write failures.
pub fn fetch_contract(
    url: &str,
    destination: &Path,
    timeout: Duration,
) -> Result<ContractDocument, SyncError> {
    let parsed = Url::parse(url).map_err(|err| SyncError::InvalidUrl {
        url: url.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SyncError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {}", parsed.scheme()),
        });
    }
    let client = Client::builder().timeout(timeout).build().map_err(|err| {
        SyncError::Transport {
            url: url.to_string(),
            cause: err.to_string(),
        }
    })?;
    tracing::info!(url, "fetching contract");
    let response = client.get(parsed.clone()).send().map_err(|err| SyncError::Transport {
        url: url.to_string(),
        cause: err.to_string(),
    })?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(SyncError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let mut bytes = Vec::new();
    response.take(MAX_CONTRACT_BYTES + 1).read_to_end(&mut bytes).map_err(|err| {
        SyncError::Transport {
            url: url.to_string(),
            cause: err.to_string(),
        }
    })?;
    if u64::try_from(bytes.len()).map_or(true, |len| len > MAX_CONTRACT_BYTES) {
        return Err(SyncError::TooLarge {
            url: url.to_string(),
        });
    }
    let text = String::from_utf8(bytes).map_err(|_| SyncError::Contract {
        url: url.to_string(),
        source: ContractError::Parse("contract must be utf-8".to_string()),
    })?;
    let format = ContractFormat::from_path(parsed.path());
    let document = parse_str(&text, format).map_err(|source| SyncError::Contract {
        url: url.to_string(),
        source,
    })?;
    write_atomic(destination, text.as_bytes()).map_err(|err| SyncError::Io {
        path: destination.display().to_string(),
        cause: err.to_string(),
    })?;
    tracing::info!(
        url,
        destination = %destination.display(),
        title = %document.info.title,
        "contract synced"
    );
    Ok(document)
}
