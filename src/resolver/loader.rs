//! Reading candidate files and extracting their declarations.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::{CalcDepsError, Diagnostics, SourceFile, WarningKind};
use crate::extractor::extract_declarations;
use crate::utils::fs::{display_path, process_files_parallel};

/// A file to load, with how it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Canonical path
    pub path: PathBuf,
    /// Belongs to the dep set
    pub external: bool,
    /// Named as an input or dep; failing to read it is fatal
    pub required: bool,
}

/// Load every candidate into a [`SourceFile`], preserving candidate order.
///
/// Unreadable optional candidates are dropped with a warning. Malformed and
/// duplicate declarations are reported as warnings.
///
/// # Errors
///
/// Returns [`CalcDepsError::ScanError`] when a required candidate cannot be
/// read, or an error if a worker task fails.
pub async fn load_sources(
    candidates: &[Candidate],
    base_dir: &Path,
    limit: usize,
    diags: &mut Diagnostics,
) -> Result<Vec<SourceFile>> {
    let paths: Vec<PathBuf> = candidates.iter().map(|c| c.path.clone()).collect();
    let results = process_files_parallel(&paths, limit, |_path, bytes| {
        extract_declarations(&String::from_utf8_lossy(&bytes))
    })
    .await?;

    let mut files = Vec::with_capacity(results.len());
    for (candidate, (path, outcome)) in candidates.iter().zip(results) {
        let shown = display_path(&path, base_dir);
        let declarations = match outcome {
            Ok(declarations) => declarations,
            Err(e) if candidate.required => {
                return Err(CalcDepsError::ScanError {
                    path: shown,
                    reason: e.to_string(),
                }
                .into());
            }
            Err(e) => {
                diags.warn(WarningKind::UnreadableCandidate, Some(path.as_path()), e.to_string());
                continue;
            }
        };

        for malformed in &declarations.malformed {
            diags.warn(
                WarningKind::MalformedDeclaration,
                Some(path.as_path()),
                format!("line {}: {}", malformed.line, malformed.text),
            );
        }
        for namespace in &declarations.duplicates {
            diags.warn(
                WarningKind::DuplicateDeclaration,
                Some(path.as_path()),
                format!("'{namespace}' is declared more than once"),
            );
        }

        debug!(
            "{}: {} provide(s), {} require(s)",
            shown,
            declarations.provides.len(),
            declarations.requires.len()
        );
        files.push(SourceFile::new(path, shown, declarations, candidate.external));
    }

    Ok(files)
}
