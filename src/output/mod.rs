//! Result projection.
//!
//! A [`Projection`] is the shape of the result for one output mode. Projecting
//! is pure: it only rearranges what the resolver computed. Turning a projection
//! into bytes is done by [`writer`].

pub mod writer;

pub use writer::{render, write_output};

use serde::Serialize;
use std::path::PathBuf;

use crate::config::OutputMode;
use crate::core::Namespace;
use crate::resolver::Calculation;

/// One `goog.addDependency` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepsRecord {
    /// Path relative to the base directory, `/`-separated
    pub relative_path: String,
    /// Provided namespaces in declaration order
    pub provide: Vec<Namespace>,
    /// Required namespaces in declaration order
    pub require: Vec<Namespace>,
}

/// One file of a concatenated script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSegment {
    /// Marker written before the file, `// Input <n>\n`
    pub marker: String,
    /// Canonical path whose bytes follow the marker
    pub path: PathBuf,
    /// Path shown in errors
    pub display_path: String,
}

/// The result of a calculation, shaped for one output mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// Ordered display paths
    List(Vec<String>),
    /// Ordered provide/require records
    Deps(Vec<DepsRecord>),
    /// Ordered concatenation plan
    Script(Vec<ScriptSegment>),
}

impl Projection {
    /// Number of files in the projection.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::List(paths) => paths.len(),
            Self::Deps(records) => records.len(),
            Self::Script(segments) => segments.len(),
        }
    }

    /// Whether the projection holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shape a calculation for `mode`.
#[must_use]
pub fn project(calculation: &Calculation, mode: OutputMode) -> Projection {
    match mode {
        OutputMode::List => Projection::List(calculation.ordered_paths()),
        OutputMode::Deps => Projection::Deps(
            calculation
                .ordered()
                .map(|file| DepsRecord {
                    relative_path: file.display_path.clone(),
                    provide: file.provides.clone(),
                    require: file.requires.clone(),
                })
                .collect(),
        ),
        OutputMode::Script => Projection::Script(
            calculation
                .ordered()
                .enumerate()
                .map(|(n, file)| ScriptSegment {
                    marker: format!("// Input {n}\n"),
                    path: file.path.clone(),
                    display_path: file.display_path.clone(),
                })
                .collect(),
        ),
    }
}
