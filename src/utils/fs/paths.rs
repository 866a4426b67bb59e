//! Path utilities for canonical and user-facing paths.
//!
//! Files are identified by their canonical path, but users see paths relative
//! to a base directory with `/` separators. These helpers convert between the two.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Render a path with forward slashes and without Windows extended-length prefixes.
#[must_use]
pub fn path_to_storage<P: AsRef<Path>>(path: P) -> String {
    let path_str = path.as_ref().to_string_lossy();

    // canonicalize() adds these prefixes on Windows; they are noise for users.
    let cleaned = if let Some(stripped) = path_str.strip_prefix(r"\\?\UNC\") {
        format!("//{stripped}")
    } else if let Some(stripped) = path_str.strip_prefix(r"\\?\") {
        stripped.to_string()
    } else {
        path_str.to_string()
    };

    cleaned.replace('\\', "/")
}

/// Path shown to users for a canonical file path.
///
/// Relative to `base_dir` when the file lives beneath it, otherwise the
/// canonical path itself. Always `/`-separated.
///
/// # Examples
///
/// ```rust,no_run
/// use calcdeps_cli::utils::fs::display_path;
/// use std::path::Path;
///
/// let shown = display_path(Path::new("/work/src/app.js"), Path::new("/work"));
/// assert_eq!(shown, "src/app.js");
///
/// let outside = display_path(Path::new("/lib/base.js"), Path::new("/work"));
/// assert_eq!(outside, "/lib/base.js");
/// ```
#[must_use]
pub fn display_path(canonical: &Path, base_dir: &Path) -> String {
    match canonical.strip_prefix(base_dir) {
        Ok(relative) if !relative.as_os_str().is_empty() => path_to_storage(relative),
        _ => path_to_storage(canonical),
    }
}

/// Canonicalize a user-supplied path, with the path in the error message.
pub fn canonicalize(path: &Path) -> Result<PathBuf> {
    path.canonicalize().with_context(|| format!("Failed to canonicalize path: {}", path.display()))
}
