//! Options for one dependency calculation.
//!
//! [`CalcOptions`] is the fully merged, immutable configuration handed to
//! [`calculate`](crate::resolver::calculate). The CLI builds one from flags,
//! environment and the settings file; library users build one directly.
//!
//! # Examples
//!
//! ```rust,no_run
//! use calcdeps_cli::config::{CalcOptions, OutputMode};
//!
//! let options = CalcOptions::new(vec!["src/app.js".into()])
//!     .with_paths(vec!["src".into(), "lib".into()])
//!     .with_deps(vec!["closure-library".into()])
//!     .with_output_mode(OutputMode::Deps);
//! assert_eq!(options.output_mode, OutputMode::Deps);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

use crate::constants::{DEFAULT_EXTENSIONS, default_max_parallel};

/// Shape of the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Ordered file paths, one per line
    #[default]
    List,
    /// Contents of every ordered file concatenated into one script
    Script,
    /// A deps file with one `goog.addDependency` per file
    Deps,
}

impl OutputMode {
    /// Parse a mode name; anything unrecognised falls back to [`OutputMode::List`].
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use calcdeps_cli::config::OutputMode;
    ///
    /// assert_eq!(OutputMode::from_name("deps"), OutputMode::Deps);
    /// assert_eq!(OutputMode::from_name("bogus"), OutputMode::List);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "list" => Self::List,
            "script" => Self::Script,
            "deps" => Self::Deps,
            other => {
                debug!("Unknown output mode '{other}', using list");
                Self::List
            }
        }
    }

    /// The canonical name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Script => "script",
            Self::Deps => "deps",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merged configuration for one calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalcOptions {
    /// Files or directories whose dependencies are calculated, in priority order.
    pub inputs: Vec<PathBuf>,
    /// Roots scanned for candidate providers.
    pub paths: Vec<PathBuf>,
    /// Files or directories whose provides are already satisfied.
    pub deps: Vec<PathBuf>,
    /// Exclusion specs (existing paths or glob patterns).
    pub excludes: Vec<String>,
    /// Shape of the result.
    pub output_mode: OutputMode,
    /// Base for display and deps-relative paths; the working directory when `None`.
    pub base_dir: Option<PathBuf>,
    /// File extensions (without the dot) treated as source files.
    pub extensions: Vec<String>,
    /// Downgrade unresolved requires to warnings.
    pub lenient: bool,
    /// Upper bound on concurrently processed files.
    pub max_parallel: usize,
}

impl Default for CalcOptions {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            paths: vec![PathBuf::from(".")],
            deps: Vec::new(),
            excludes: Vec::new(),
            output_mode: OutputMode::default(),
            base_dir: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect(),
            lenient: false,
            max_parallel: default_max_parallel(),
        }
    }
}

impl CalcOptions {
    /// Options with defaults for everything but the inputs.
    #[must_use]
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            ..Self::default()
        }
    }

    /// Replace the scan roots.
    #[must_use]
    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    /// Replace the dep set.
    #[must_use]
    pub fn with_deps(mut self, deps: Vec<PathBuf>) -> Self {
        self.deps = deps;
        self
    }

    /// Replace the exclusion specs.
    #[must_use]
    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.excludes = excludes;
        self
    }

    /// Set the output mode.
    #[must_use]
    pub const fn with_output_mode(mut self, output_mode: OutputMode) -> Self {
        self.output_mode = output_mode;
        self
    }

    /// Set the base directory for display paths.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Replace the recognised extensions.
    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Set lenient mode.
    #[must_use]
    pub const fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Set the worker pool bound.
    #[must_use]
    pub const fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = max_parallel;
        self
    }
}
