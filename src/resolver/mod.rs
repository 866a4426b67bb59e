//! Dependency calculation for Closure-style sources.
//!
//! This module drives the whole pipeline from path specifications to an
//! ordered list of source files. It is the entry point for library users and
//! for the CLI.
//!
//! # Pipeline
//!
//! ## Phase 1: Scan
//! 1. **Validation**: at least one input, a positive worker bound
//! 2. **Exclusions**: compile `--exclude` specs into an [`ExcludeSet`]
//! 3. **Scanning**: deps, inputs and roots become canonical candidate paths
//!    ([`crate::scanner`])
//!
//! ## Phase 2: Load
//! 1. **Extraction**: every candidate is read and its declarations extracted
//!    on a bounded worker pool ([`loader`])
//! 2. **Indexing**: all provides are merged into a frozen [`NamespaceIndex`];
//!    duplicate providers fail here, before any ordering happens
//!
//! ## Phase 3: Order
//! 1. **Resolution**: depth-first post-order from each input in caller order
//!    ([`Resolver`])
//! 2. **Base file**: in `list` and `script` modes a scanned `base.js` that was
//!    ordered and requires nothing is moved to the front
//!
//! # Candidate Table
//!
//! Files enter the table in this order: root files, then inputs not found
//! under a root, then deps. A file that is both a dep and under a root is
//! treated as a dep. The table order decides which file is "first" in a
//! duplicate provider report.
//!
//! # Determinism
//!
//! No hash map is iterated to produce output. Given the same file tree and the
//! same options, the result is identical on every run regardless of worker
//! scheduling.
//!
//! # Examples
//!
//! ```rust,no_run
//! use calcdeps_cli::config::CalcOptions;
//! use calcdeps_cli::resolver::calculate;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let options = CalcOptions::new(vec!["src/app.js".into()])
//!     .with_paths(vec!["src".into()])
//!     .with_deps(vec!["closure/goog".into()]);
//!
//! let calculation = calculate(&options).await?;
//! for file in calculation.ordered() {
//!     println!("{}", file.display_path);
//! }
//! # Ok(())
//! # }
//! ```

pub mod dependency_graph;
pub mod loader;
pub mod namespace_index;

pub use dependency_graph::Resolver;
pub use loader::{Candidate, load_sources};
pub use namespace_index::{NamespaceIndex, Provider};

use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{CalcOptions, OutputMode};
use crate::core::{CalcDepsError, Diagnostics, FileId, SourceFile};
use crate::pattern::ExcludeSet;
use crate::scanner::{ScanRole, Scanner};
use crate::utils::fs::{canonicalize, display_path};

/// Result of one calculation.
#[derive(Debug)]
pub struct Calculation {
    /// Every loaded file, including deps and files that were not needed.
    pub files: Vec<SourceFile>,
    /// Resolution order as indices into [`files`](Self::files).
    pub order: Vec<FileId>,
    /// Warnings collected along the way.
    pub diagnostics: Diagnostics,
    /// Canonical base directory for display and deps-relative paths.
    pub base_dir: PathBuf,
}

impl Calculation {
    /// Files in resolution order.
    pub fn ordered(&self) -> impl Iterator<Item = &SourceFile> {
        self.order.iter().map(|id| &self.files[id.index()])
    }

    /// Display paths in resolution order.
    #[must_use]
    pub fn ordered_paths(&self) -> Vec<String> {
        self.ordered().map(|file| file.display_path.clone()).collect()
    }
}

/// Run a full calculation.
///
/// # Errors
///
/// Any fatal [`CalcDepsError`] from scanning, indexing or resolution, wrapped
/// in [`anyhow::Error`] so callers can downcast it.
pub async fn calculate(options: &CalcOptions) -> Result<Calculation> {
    if options.inputs.is_empty() {
        return Err(CalcDepsError::NoInputs.into());
    }
    if options.max_parallel == 0 {
        return Err(CalcDepsError::ConfigError {
            message: "max parallel must be at least 1".to_string(),
        }
        .into());
    }

    let base_dir = match &options.base_dir {
        Some(dir) => canonicalize(dir)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to determine the working directory")?;
            canonicalize(&cwd)?
        }
    };
    debug!("Base directory: {}", base_dir.display());

    let excludes = ExcludeSet::from_entries(&options.excludes)?;
    let scanner = Scanner::new(&excludes, &options.extensions, &base_dir);
    let mut diags = Diagnostics::new();

    let dep_paths = scanner.scan(&options.deps, ScanRole::Dep, &mut diags)?;
    let input_paths = scanner.scan(&options.inputs, ScanRole::Input, &mut diags)?;
    if input_paths.is_empty() {
        return Err(CalcDepsError::NoInputs.into());
    }
    let root_paths = scanner.scan(&options.paths, ScanRole::Root, &mut diags)?;

    let dep_set: HashSet<&Path> = dep_paths.iter().map(PathBuf::as_path).collect();
    if let Some(conflict) = input_paths.iter().find(|path| dep_set.contains(path.as_path())) {
        return Err(CalcDepsError::ExternalInput {
            path: display_path(conflict, &base_dir),
        }
        .into());
    }

    let candidates = candidate_table(&root_paths, &input_paths, &dep_paths);
    info!(
        "Scanned {} candidate file(s) ({} input, {} dep)",
        candidates.len(),
        input_paths.len(),
        dep_paths.len()
    );

    let files = load_sources(&candidates, &base_dir, options.max_parallel, &mut diags).await?;
    let index = NamespaceIndex::build(&files, &mut diags)?;

    let ids: HashMap<&Path, FileId> =
        files.iter().enumerate().map(|(i, file)| (file.path(), FileId::new(i))).collect();
    let inputs = input_paths
        .iter()
        .map(|path| {
            ids.get(path.as_path()).copied().ok_or_else(|| CalcDepsError::ScanError {
                path: display_path(path, &base_dir),
                reason: "input was not loaded".to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut order = Resolver::new(&files, &index).lenient(options.lenient).resolve(&inputs, &mut diags)?;

    if options.output_mode != OutputMode::Deps {
        place_base_file_first(&files, &mut order);
    }

    info!("Resolved {} file(s)", order.len());
    Ok(Calculation {
        files,
        order,
        diagnostics: diags,
        base_dir,
    })
}

fn candidate_table(roots: &[PathBuf], inputs: &[PathBuf], deps: &[PathBuf]) -> Vec<Candidate> {
    let dep_set: HashSet<&PathBuf> = deps.iter().collect();
    let input_set: HashSet<&PathBuf> = inputs.iter().collect();
    let mut seen = HashSet::new();
    let mut table = Vec::with_capacity(roots.len() + inputs.len() + deps.len());

    for path in roots.iter().chain(inputs) {
        if dep_set.contains(path) || !seen.insert(path) {
            continue;
        }
        table.push(Candidate {
            path: path.clone(),
            external: false,
            required: input_set.contains(path),
        });
    }
    for path in deps {
        table.push(Candidate {
            path: path.clone(),
            external: true,
            required: true,
        });
    }
    table
}

/// Move the first scanned base file to the front of `order`.
///
/// Only a base file the resolver already ordered and that requires nothing is
/// moved; anything else would add a file no input needs or break the
/// dependency order.
fn place_base_file_first(files: &[SourceFile], order: &mut Vec<FileId>) {
    let Some(position) = files.iter().position(|file| file.is_base && !file.external) else {
        return;
    };
    let base = FileId::new(position);
    let Some(current) = order.iter().position(|&id| id == base) else {
        return;
    };
    if current == 0 {
        return;
    }
    if !files[position].requires.is_empty() {
        debug!(
            "Base file {} requires other files; keeping resolved order",
            files[position].display_path
        );
        return;
    }
    order.remove(current);
    order.insert(0, base);
    debug!("Base file {} placed first", files[position].display_path);
}
