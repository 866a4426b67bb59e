//! Atomic file writes.
//!
//! Generated output (`--output_file`) is written to a temporary sibling and
//! renamed into place, so readers never observe a half-written deps file.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes bytes to a file atomically.
///
/// Parent directories are created as needed. The content goes to a uniquely
/// named temporary file in the target directory, is synced to disk, and is
/// then persisted over `path`. Existing siblings are never touched.
///
/// # Examples
///
/// ```rust,no_run
/// use calcdeps_cli::utils::fs::atomic_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// atomic_write(Path::new("build/deps.js"), b"// generated\n")?;
/// # Ok(())
/// # }
/// ```
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let mut file = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;

    file.write_all(content)
        .with_context(|| format!("Failed to write to temp file: {}", file.path().display()))?;

    file.as_file().sync_all().with_context(|| "Failed to sync file to disk")?;

    file.persist(path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}
