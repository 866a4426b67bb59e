//! Namespace to provider lookup.
//!
//! The index maps every provided namespace to the file that provides it. Files
//! from the dep set go into a separate overlay that is consulted first, so a
//! dep masks a scanned file providing the same namespace.

use std::collections::HashMap;
use tracing::debug;

use crate::core::{CalcDepsError, Diagnostics, FileId, Namespace, SourceFile, WarningKind};

/// Where a namespace comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Provided by a scanned file that must be ordered and emitted
    Internal(FileId),
    /// Provided by a dep file; already satisfied
    External(FileId),
}

/// Frozen namespace index for one calculation.
#[derive(Debug, Default)]
pub struct NamespaceIndex {
    providers: HashMap<Namespace, FileId>,
    external: HashMap<Namespace, FileId>,
}

impl NamespaceIndex {
    /// Build the index from the whole file table.
    ///
    /// Files are registered in table order, so "first" in duplicate reports
    /// means first in scan order.
    ///
    /// # Errors
    ///
    /// Returns [`CalcDepsError::DuplicateProvider`] when two non-external files
    /// provide the same namespace.
    pub fn build(files: &[SourceFile], diags: &mut Diagnostics) -> Result<Self, CalcDepsError> {
        let mut index = Self::default();
        for (position, file) in files.iter().enumerate() {
            index.register(FileId::new(position), files, diags)?;
        }

        for (namespace, id) in &index.providers {
            if let Some(masking) = index.external.get(namespace) {
                debug!(
                    "'{}' from {} is masked by dep {}",
                    namespace,
                    files[id.index()].display_path,
                    files[masking.index()].display_path
                );
            }
        }

        debug!(
            "Indexed {} provided and {} external namespace(s)",
            index.providers.len(),
            index.external.len()
        );
        Ok(index)
    }

    fn register(&mut self, id: FileId, files: &[SourceFile], diags: &mut Diagnostics) -> Result<(), CalcDepsError> {
        let file = &files[id.index()];
        for namespace in &file.provides {
            if file.external {
                if let Some(first) = self.external.get(namespace) {
                    diags.warn(
                        WarningKind::DuplicateExternalProvider,
                        Some(file.path()),
                        format!(
                            "'{namespace}' is already provided by dep {}; keeping the first",
                            files[first.index()].display_path
                        ),
                    );
                    continue;
                }
                self.external.insert(namespace.clone(), id);
            } else {
                if let Some(first) = self.providers.get(namespace) {
                    return Err(CalcDepsError::DuplicateProvider {
                        namespace: namespace.clone(),
                        first: files[first.index()].display_path.clone(),
                        second: file.display_path.clone(),
                    });
                }
                self.providers.insert(namespace.clone(), id);
            }
        }
        Ok(())
    }

    /// Find the provider of a namespace; the dep overlay wins.
    #[must_use]
    pub fn lookup(&self, namespace: &str) -> Option<Provider> {
        self.external
            .get(namespace)
            .map(|&id| Provider::External(id))
            .or_else(|| self.providers.get(namespace).map(|&id| Provider::Internal(id)))
    }

    /// Total number of indexed namespaces, counting both layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len() + self.external.len()
    }

    /// Whether nothing is provided at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty() && self.external.is_empty()
    }
}
