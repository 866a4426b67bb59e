//! Non-fatal issues collected during a calculation.
//!
//! Warnings never stop the pipeline. Each one is logged through `tracing` when
//! it is recorded and kept so callers (and tests) can inspect them afterwards.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Category of a [`Warning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// A `--path` root is missing or unreadable
    UnreadableRoot,
    /// A directory entry could not be read while walking (includes symlink loops)
    WalkError,
    /// A discovered candidate file could not be read
    UnreadableCandidate,
    /// A declaration whose argument is not a string literal
    MalformedDeclaration,
    /// The same namespace declared twice in one file
    DuplicateDeclaration,
    /// Two dep files provide the same namespace; the first one wins
    DuplicateExternalProvider,
    /// An excluded input file was dropped
    ExcludedInput,
    /// A required namespace has no provider (lenient mode only)
    UnresolvedRequire,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnreadableRoot => "unreadable-root",
            Self::WalkError => "walk-error",
            Self::UnreadableCandidate => "unreadable-candidate",
            Self::MalformedDeclaration => "malformed-declaration",
            Self::DuplicateDeclaration => "duplicate-declaration",
            Self::DuplicateExternalProvider => "duplicate-external-provider",
            Self::ExcludedInput => "excluded-input",
            Self::UnresolvedRequire => "unresolved-require",
        };
        f.write_str(name)
    }
}

/// A single non-fatal issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// What went wrong
    pub kind: WarningKind,
    /// The file or directory involved, when there is one
    pub path: Option<PathBuf>,
    /// Human-readable description
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{}] {}: {}", self.kind, path.display(), self.message),
            None => write!(f, "[{}] {}", self.kind, self.message),
        }
    }
}

/// Ordered collection of warnings for one calculation.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and log a warning.
    pub fn warn(&mut self, kind: WarningKind, path: Option<&Path>, message: impl Into<String>) {
        let warning = Warning {
            kind,
            path: path.map(Path::to_path_buf),
            message: message.into(),
        };
        warn!("{warning}");
        self.warnings.push(warning);
    }

    /// All warnings in the order they were recorded.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Warnings of a single kind.
    pub fn of_kind(&self, kind: WarningKind) -> impl Iterator<Item = &Warning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }

    /// Number of recorded warnings.
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}
