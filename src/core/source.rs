//! Source file model.
//!
//! A [`SourceFile`] is one scanned unit: its canonical path, the path shown to
//! users, and the namespaces it provides and requires. Files are created once
//! from a scan-and-extract pass and never mutated afterwards; the resolver
//! refers to them by [`FileId`].

use std::fmt;
use std::path::{Path, PathBuf};

use crate::extractor::Declarations;

/// A dotted namespace identifier such as `goog.array` or `app.ui.Button`.
///
/// Equality is exact string match.
pub type Namespace = String;

/// Index of a [`SourceFile`] within the file table of one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(usize);

impl FileId {
    /// Wrap a position in the file table.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the file table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A scanned source unit and its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Canonical file-system path; the identity of the file.
    pub path: PathBuf,
    /// `/`-separated path relative to the base directory, or the canonical path
    /// when the file lives outside it.
    pub display_path: String,
    /// Provided namespaces in declaration order.
    pub provides: Vec<Namespace>,
    /// Required namespaces in declaration order.
    pub requires: Vec<Namespace>,
    /// Member of the dep set: its provides are already satisfied and the file
    /// itself is never emitted or traversed.
    pub external: bool,
    /// The file defines the `goog` root object (Closure's `base.js`).
    pub is_base: bool,
}

impl SourceFile {
    /// Build a file from extracted declarations.
    pub fn new(
        path: impl Into<PathBuf>,
        display_path: impl Into<String>,
        declarations: Declarations,
        external: bool,
    ) -> Self {
        Self {
            path: path.into(),
            display_path: display_path.into(),
            provides: declarations.provides,
            requires: declarations.requires,
            external,
            is_base: declarations.is_base,
        }
    }

    /// Canonical path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_path)
    }
}
