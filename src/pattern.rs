//! Exclusion patterns for source scanning.
//!
//! An exclude given on the command line is interpreted in one of two ways:
//!
//! - **Existing path**: if the entry names a file or directory that exists, it
//!   excludes that file or everything beneath that directory. Matching is done
//!   on canonical paths, so `./lib/../vendor` and `vendor` are the same exclude.
//! - **Glob pattern**: anything else is compiled as a `glob` pattern and
//!   matched against both the display path and the canonical path of each
//!   candidate.
//!
//! # Pattern Syntax
//!
//! - `*` matches any sequence of characters within a single path component
//! - `**` matches any sequence of path components
//! - `?` matches any single character
//! - `[abc]` / `[a-z]` match one character from a set or range
//!
//! # Examples
//!
//! ```rust,no_run
//! use calcdeps_cli::pattern::ExcludeSet;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut excludes = ExcludeSet::new();
//! excludes.exclude("third_party")?;     // existing directory
//! excludes.exclude("**/*_test.js")?;    // glob
//!
//! let excluded = excludes.is_excluded("src/app_test.js", Path::new("/work/src/app_test.js"));
//! assert!(excluded);
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::CalcDepsError;
use crate::utils::fs::path_to_storage;

/// Compiled set of exclusions.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    /// Canonical paths excluded together with everything beneath them
    prefixes: Vec<PathBuf>,
    /// Glob patterns matched against display and canonical paths
    patterns: Vec<Pattern>,
}

impl ExcludeSet {
    /// Creates an empty set that excludes nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prefixes: Vec::new(),
            patterns: Vec::new(),
        }
    }

    /// Compile every entry in order.
    ///
    /// # Errors
    ///
    /// Returns [`CalcDepsError::ConfigError`] for an entry that is neither an
    /// existing path nor a valid glob.
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let mut set = Self::new();
        for entry in entries {
            set.exclude(entry.as_ref())?;
        }
        Ok(set)
    }

    /// Adds one exclusion.
    ///
    /// Relative paths are resolved against the current working directory.
    pub fn exclude(&mut self, entry: &str) -> Result<()> {
        if let Ok(canonical) = Path::new(entry).canonicalize() {
            debug!("Excluding path {}", canonical.display());
            self.prefixes.push(canonical);
            return Ok(());
        }

        let pattern = Pattern::new(entry).map_err(|e| CalcDepsError::ConfigError {
            message: format!("Invalid exclusion pattern '{entry}': {e}"),
        })?;
        debug!("Excluding pattern {entry}");
        self.patterns.push(pattern);
        Ok(())
    }

    /// Whether a candidate is excluded.
    ///
    /// `display` is the user-facing path (see
    /// [`display_path`](crate::utils::fs::display_path)); `canonical` is the
    /// file's canonical path.
    pub fn is_excluded(&self, display: &str, canonical: &Path) -> bool {
        if self.prefixes.iter().any(|prefix| canonical.starts_with(prefix)) {
            return true;
        }

        if self.patterns.is_empty() {
            return false;
        }

        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        let canonical_str = path_to_storage(canonical);
        self.patterns.iter().any(|pattern| {
            pattern.matches_with(display, options) || pattern.matches_with(&canonical_str, options)
        })
    }

    /// Number of exclusions.
    pub fn len(&self) -> usize {
        self.prefixes.len() + self.patterns.len()
    }

    /// Whether the set excludes nothing.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.patterns.is_empty()
    }
}
