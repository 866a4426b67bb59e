//! Source scanning.
//!
//! Turns path specifications into a deduplicated, ordered list of canonical
//! source file paths. A specification is either a file, taken as-is, or a
//! directory, walked recursively for files with a recognised extension.
//!
//! # Roles
//!
//! The same scanner serves three kinds of specification, distinguished by
//! [`ScanRole`]:
//!
//! | Role    | Missing path   | Excludes applied | Example flag |
//! |---------|----------------|------------------|--------------|
//! | `Input` | `ScanError`    | yes              | `--input`    |
//! | `Dep`   | `ScanError`    | no               | `--dep`      |
//! | `Root`  | warning        | yes              | `--path`     |
//!
//! # Ordering
//!
//! Specifications are processed in caller order. Directory entries are visited
//! sorted by file name. A file reached twice keeps its first position, and a
//! directory reached twice (through a symlink, or by naming both a directory and
//! its parent) is walked once, which also terminates symlink cycles.

use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::core::{CalcDepsError, Diagnostics, WarningKind};
use crate::pattern::ExcludeSet;
use crate::utils::fs::display_path;

/// What a batch of path specifications is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanRole {
    /// Files whose dependencies are calculated
    Input,
    /// Files whose provides are already satisfied
    Dep,
    /// Roots searched for providers
    Root,
}

impl ScanRole {
    /// Whether a missing or unreadable path is fatal.
    const fn is_required(self) -> bool {
        matches!(self, Self::Input | Self::Dep)
    }

    const fn applies_excludes(self) -> bool {
        !matches!(self, Self::Dep)
    }
}

/// Scans path specifications into candidate source files.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    excludes: &'a ExcludeSet,
    extensions: &'a [String],
    base_dir: &'a Path,
}

/// Bookkeeping for a single [`Scanner::scan`] call.
#[derive(Debug, Default)]
struct ScanState {
    seen_files: HashSet<PathBuf>,
    seen_dirs: HashSet<PathBuf>,
    files: Vec<PathBuf>,
}

impl ScanState {
    fn push(&mut self, path: PathBuf) {
        if self.seen_files.insert(path.clone()) {
            self.files.push(path);
        }
    }
}

impl<'a> Scanner<'a> {
    /// Create a scanner.
    ///
    /// `base_dir` must be canonical; it is used to build the display paths that
    /// glob excludes are matched against.
    #[must_use]
    pub const fn new(excludes: &'a ExcludeSet, extensions: &'a [String], base_dir: &'a Path) -> Self {
        Self {
            excludes,
            extensions,
            base_dir,
        }
    }

    /// Scan every specification and return canonical file paths in scan order.
    ///
    /// # Errors
    ///
    /// Returns [`CalcDepsError::ScanError`] when a required specification
    /// ([`ScanRole::Input`] or [`ScanRole::Dep`]) cannot be read.
    pub fn scan(&self, specs: &[PathBuf], role: ScanRole, diags: &mut Diagnostics) -> Result<Vec<PathBuf>> {
        let mut state = ScanState::default();

        for spec in specs {
            let canonical = match spec.canonicalize() {
                Ok(path) => path,
                Err(e) if role.is_required() => {
                    return Err(CalcDepsError::ScanError {
                        path: spec.display().to_string(),
                        reason: e.to_string(),
                    }
                    .into());
                }
                Err(e) => {
                    diags.warn(WarningKind::UnreadableRoot, Some(spec.as_path()), format!("cannot read path: {e}"));
                    continue;
                }
            };

            if canonical.is_dir() {
                self.walk(spec, &canonical, role, &mut state, diags)?;
            } else {
                self.add_explicit(spec, canonical, role, &mut state, diags);
            }
        }

        debug!("Scanned {} {:?} file(s) from {} spec(s)", state.files.len(), role, specs.len());
        Ok(state.files)
    }

    /// A file named directly; the extension filter does not apply.
    fn add_explicit(
        &self,
        spec: &Path,
        canonical: PathBuf,
        role: ScanRole,
        state: &mut ScanState,
        diags: &mut Diagnostics,
    ) {
        if role.applies_excludes() && self.is_excluded(&canonical) {
            match role {
                ScanRole::Input => {
                    diags.warn(WarningKind::ExcludedInput, Some(spec), "input matches an exclude and is dropped");
                }
                _ => debug!("Excluded {}", canonical.display()),
            }
            return;
        }
        state.push(canonical);
    }

    fn walk(
        &self,
        spec: &Path,
        root: &Path,
        role: ScanRole,
        state: &mut ScanState,
        diags: &mut Diagnostics,
    ) -> Result<()> {
        let mut entries = WalkDir::new(root).follow_links(true).sort_by_file_name().into_iter();

        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 && role.is_required() => {
                    return Err(CalcDepsError::ScanError {
                        path: spec.display().to_string(),
                        reason: e.to_string(),
                    }
                    .into());
                }
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    diags.warn(WarningKind::WalkError, Some(path.as_path()), e.to_string());
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                let canonical = match entry.path().canonicalize() {
                    Ok(path) => path,
                    Err(e) => {
                        diags.warn(WarningKind::WalkError, Some(entry.path()), e.to_string());
                        entries.skip_current_dir();
                        continue;
                    }
                };
                if !state.seen_dirs.insert(canonical.clone()) {
                    debug!("Directory already scanned: {}", entry.path().display());
                    entries.skip_current_dir();
                    continue;
                }
                if role.applies_excludes() && self.is_excluded(&canonical) {
                    debug!("Excluded directory {}", canonical.display());
                    entries.skip_current_dir();
                }
                continue;
            }

            if !file_type.is_file() || !self.has_source_extension(entry.path()) {
                continue;
            }

            match entry.path().canonicalize() {
                Ok(canonical) => {
                    if role.applies_excludes() && self.is_excluded(&canonical) {
                        debug!("Excluded {}", canonical.display());
                    } else {
                        state.push(canonical);
                    }
                }
                Err(e) => diags.warn(WarningKind::WalkError, Some(entry.path()), e.to_string()),
            }
        }

        Ok(())
    }

    fn is_excluded(&self, canonical: &Path) -> bool {
        self.excludes.is_excluded(&display_path(canonical, self.base_dir), canonical)
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|known| known == ext))
    }
}
