// crates/apiforge-sdk-gen/src/output.rs
// ============================================================================
// Module: File Set Output
// Description: Persists generated file sets and checks them for drift.
// Purpose: Write generated projects atomically and verify regenerations.
// Dependencies: apiforge-contract, tracing
// ============================================================================

//! ## Overview
//! [`write_file_set`] writes every file under a root directory through a
//! temp file and rename. [`check_file_set`] compares a freshly generated set
//! against disk and reports every missing or differing file in one
//! [`SdkGenError::Drift`].
//!
//! Relative paths are validated before use: absolute paths and `..`
//! components are rejected so a file set can never escape its root.

use std::fs;
use std::io::ErrorKind;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use apiforge_contract::atomic::write_atomic;

use crate::FileSet;
use crate::SdkGenError;

// ============================================================================
// SECTION: Path Validation
// ============================================================================

/// Resolves a file set path under `root`.
fn resolve(root: &Path, relative: &str) -> Result<PathBuf, SdkGenError> {
    let path = Path::new(relative);
    let valid = !relative.is_empty()
        && path.components().all(|component| matches!(component, Component::Normal(_)));
    if !valid {
        return Err(SdkGenError::Io(format!("invalid output path: {relative}")));
    }
    Ok(root.join(path))
}

// ============================================================================
// SECTION: Write and Check
// ============================================================================

/// Writes a file set under `root`, returning the written paths.
///
/// # Errors
/// Returns [`SdkGenError::Io`] for invalid relative paths and write failures.
/// Files are not written transactionally; a failure may leave earlier files
/// in place.
pub fn write_file_set(root: &Path, files: &FileSet) -> Result<Vec<PathBuf>, SdkGenError> {
    let mut written = Vec::with_capacity(files.len());
    for (relative, contents) in files {
        let path = resolve(root, relative)?;
        write_atomic(&path, contents.as_bytes())
            .map_err(|err| SdkGenError::Io(format!("{}: {err}", path.display())))?;
        tracing::info!(path = %path.display(), "wrote generated file");
        written.push(path);
    }
    Ok(written)
}

/// Verifies that the files under `root` match a generated file set.
///
/// # Errors
/// Returns [`SdkGenError::Drift`] listing missing and changed files, and
/// [`SdkGenError::Io`] for invalid paths and unreadable files.
pub fn check_file_set(root: &Path, files: &FileSet) -> Result<(), SdkGenError> {
    let mut drift = Vec::new();
    for (relative, contents) in files {
        let path = resolve(root, relative)?;
        match fs::read_to_string(&path) {
            Ok(existing) if existing == *contents => {}
            Ok(_) => drift.push(format!("changed {relative}")),
            Err(err) if err.kind() == ErrorKind::NotFound => drift.push(format!("missing {relative}")),
            Err(err) => return Err(SdkGenError::Io(format!("{}: {err}", path.display()))),
        }
    }
    if drift.is_empty() {
        return Ok(());
    }
    Err(SdkGenError::Drift(format!(
        "{} under {}. Run apiforge generate.",
        drift.join(", "),
        root.display()
    )))
}
