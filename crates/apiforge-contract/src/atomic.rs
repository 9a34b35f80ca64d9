// crates/apiforge-contract/src/atomic.rs
// ============================================================================
// Module: Atomic File Output
// Description: Temp-file-and-rename writes shared by generators and stores.
// Purpose: Avoid torn files when generated artifacts or plans are persisted.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`write_atomic`] writes contents to a uniquely named sibling temp file,
//! syncs it, and renames it over the destination. Parent directories are
//! created on demand. On platforms without atomic replace this falls back to
//! remove-and-rename.

use std::fs;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

// ============================================================================
// CONSTANTS: Temporary output file handling
// ============================================================================

/// Attempts made to allocate a unique temp file name.
const TEMP_ATTEMPTS: usize = 16;
/// Per-process counter for temp file names.
static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Writes `contents` to `path` through a temp file and rename.
///
/// # Errors
/// Returns the underlying IO error when any step fails; the temp file is
/// removed on failure.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let (temp_path, mut file) = create_temp_output(path)?;
    if let Err(err) = file.write_all(contents).and_then(|()| file.sync_all()) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    drop(file);
    persist_temp_output(&temp_path, path)
}

/// Creates a unique temporary output file alongside the destination.
fn create_temp_output(path: &Path) -> io::Result<(PathBuf, fs::File)> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::other("output path does not include a file name"))?;
    for _ in 0 .. TEMP_ATTEMPTS {
        let attempt = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let temp_name = format!(".{file_name}.tmp.{}.{}", std::process::id(), attempt);
        let temp_path = parent.join(temp_name);
        match OpenOptions::new().write(true).create_new(true).open(&temp_path) {
            Ok(file) => return Ok((temp_path, file)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {}
            Err(err) => return Err(err),
        }
    }
    Err(io::Error::other("failed to allocate temporary output path"))
}

/// Persists the temporary output file to the final destination.
fn persist_temp_output(temp_path: &Path, path: &Path) -> io::Result<()> {
    match fs::rename(temp_path, path) {
        Ok(()) => Ok(()),
        Err(err) => {
            if path.exists() {
                fs::remove_file(path)?;
                return fs::rename(temp_path, path);
            }
            let _ = fs::remove_file(temp_path);
            Err(err)
        }
    }
}
