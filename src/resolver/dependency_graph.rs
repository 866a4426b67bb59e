//! Dependency ordering over the implicit require graph.
//!
//! Nodes are non-external source files; an edge A → B exists when A requires a
//! namespace that B provides. The graph is never materialized: edges are found
//! by looking each require up in the [`NamespaceIndex`] while traversing.
//!
//! Ordering is a depth-first post-order traversal with three-colour marking,
//! run iteratively over an explicit frame stack so deep require chains cannot
//! exhaust the native stack. The result only depends on input order and
//! declaration order.

use std::fmt;

use super::namespace_index::{NamespaceIndex, Provider};
use crate::core::{CalcDepsError, Diagnostics, FileId, SourceFile, WarningKind};

/// Color states for traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// Node has not been visited.
    White,
    /// Node is on the current traversal path.
    Gray,
    /// Node and everything it requires have been emitted.
    Black,
}

/// Per-file traversal state.
#[derive(Debug)]
struct Node<'a> {
    file: &'a SourceFile,
    mark: Mark,
}

/// One level of the explicit DFS stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    id: FileId,
    /// Index of the next require of `id` to look at.
    next: usize,
}

/// Orders files so that every provider precedes the files requiring it.
///
/// # Examples
///
/// ```rust,no_run
/// use calcdeps_cli::core::{Diagnostics, FileId, SourceFile};
/// use calcdeps_cli::resolver::{NamespaceIndex, Resolver};
///
/// # fn example(files: Vec<SourceFile>) -> anyhow::Result<()> {
/// let mut diags = Diagnostics::new();
/// let index = NamespaceIndex::build(&files, &mut diags)?;
/// let order = Resolver::new(&files, &index).resolve(&[FileId::new(0)], &mut diags)?;
/// for id in order {
///     println!("{}", files[id.index()]);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Resolver<'a> {
    nodes: Vec<Node<'a>>,
    index: &'a NamespaceIndex,
    lenient: bool,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over a file table and its frozen index.
    #[must_use]
    pub fn new(files: &'a [SourceFile], index: &'a NamespaceIndex) -> Self {
        Self {
            nodes: files
                .iter()
                .map(|file| Node {
                    file,
                    mark: Mark::White,
                })
                .collect(),
            index,
            lenient: false,
        }
    }

    /// Report unresolved requires as warnings instead of failing.
    #[must_use]
    pub const fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Resolve the transitive requirements of `inputs`, in input order.
    ///
    /// # Errors
    ///
    /// - [`CalcDepsError::ExternalInput`] if an input is a dep file
    /// - [`CalcDepsError::DependencyCycle`] naming the full cycle
    /// - [`CalcDepsError::UnresolvedRequire`] unless lenient
    pub fn resolve(mut self, inputs: &[FileId], diags: &mut Diagnostics) -> Result<Vec<FileId>, CalcDepsError> {
        let mut order = Vec::new();

        for &input in inputs {
            let node = &self.nodes[input.index()];
            if node.file.external {
                return Err(CalcDepsError::ExternalInput {
                    path: node.file.display_path.clone(),
                });
            }
            if node.mark == Mark::White {
                self.visit(input, &mut order, diags)?;
            }
        }

        Ok(order)
    }

    fn visit(&mut self, root: FileId, order: &mut Vec<FileId>, diags: &mut Diagnostics) -> Result<(), CalcDepsError> {
        self.nodes[root.index()].mark = Mark::Gray;
        let mut stack = vec![Frame { id: root, next: 0 }];

        while let Some(frame) = stack.last_mut() {
            let file = self.nodes[frame.id.index()].file;

            let Some(namespace) = file.requires.get(frame.next) else {
                let id = frame.id;
                stack.pop();
                self.nodes[id.index()].mark = Mark::Black;
                order.push(id);
                continue;
            };
            frame.next += 1;

            match self.index.lookup(namespace) {
                Some(Provider::External(_)) => {}
                Some(Provider::Internal(target)) => match self.mark(target) {
                    Mark::White => {
                        self.nodes[target.index()].mark = Mark::Gray;
                        stack.push(Frame { id: target, next: 0 });
                    }
                    Mark::Gray => return Err(self.cycle_error(&stack, target)),
                    Mark::Black => {}
                },
                None if self.lenient => {
                    diags.warn(
                        WarningKind::UnresolvedRequire,
                        Some(file.path()),
                        format!("'{namespace}' is not provided by any file"),
                    );
                }
                None => {
                    return Err(CalcDepsError::UnresolvedRequire {
                        namespace: namespace.clone(),
                        file: file.display_path.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    fn mark(&self, id: FileId) -> Mark {
        self.nodes[id.index()].mark
    }

    fn cycle_error(&self, stack: &[Frame], target: FileId) -> CalcDepsError {
        // `target` is gray, so it is on the stack.
        let start = stack.iter().position(|frame| frame.id == target).unwrap_or(0);
        let chain = stack[start..]
            .iter()
            .map(|frame| frame.id)
            .chain(std::iter::once(target))
            .map(|id| self.nodes[id.index()].file.display_path.as_str())
            .collect::<Vec<_>>()
            .join(" → ");
        CalcDepsError::DependencyCycle { chain }
    }
}

impl fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("nodes", &self.nodes.len())
            .field("lenient", &self.lenient)
            .finish()
    }
}
