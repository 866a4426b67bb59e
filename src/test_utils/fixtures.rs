//! Test fixtures for building source trees on disk.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Source text for a file with the given declarations.
///
/// Provides come first, then requires, then a line of code, the way a typical
/// Closure file is laid out.
#[derive(Clone, Debug, Default)]
pub struct JsFixture {
    pub provides: Vec<String>,
    pub requires: Vec<String>,
    pub body: String,
}

impl JsFixture {
    /// A file providing `namespace`.
    pub fn providing(namespace: &str) -> Self {
        Self {
            provides: vec![namespace.to_string()],
            ..Self::default()
        }
    }

    /// Add a require.
    pub fn requiring(mut self, namespace: &str) -> Self {
        self.requires.push(namespace.to_string());
        self
    }

    /// Replace the code that follows the declarations.
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    /// Render the file contents.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for namespace in &self.provides {
            out.push_str(&format!("goog.provide('{namespace}');\n"));
        }
        if !self.requires.is_empty() {
            out.push('\n');
        }
        for namespace in &self.requires {
            out.push_str(&format!("goog.require('{namespace}');\n"));
        }
        out.push('\n');
        out.push_str(&self.body);
        out
    }
}

/// A temporary directory holding source files.
///
/// The directory is deleted when the tree is dropped. [`SourceTree::root`] is
/// canonical, so it can be compared with paths produced by the scanner.
#[derive(Debug)]
pub struct SourceTree {
    _temp: TempDir,
    root: PathBuf,
}

impl SourceTree {
    /// Create an empty tree.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("Failed to create temp dir")?;
        let root = temp.path().canonicalize().context("Failed to canonicalize temp dir")?;
        Ok(Self {
            _temp: temp,
            root,
        })
    }

    /// Canonical root of the tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of `relative` inside the tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Write a file with arbitrary content, creating parent directories.
    pub fn file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Write a JavaScript file with the given provides and requires.
    pub fn js(&self, relative: &str, provides: &[&str], requires: &[&str]) -> Result<PathBuf> {
        let fixture = JsFixture {
            provides: provides.iter().map(ToString::to_string).collect(),
            requires: requires.iter().map(ToString::to_string).collect(),
            body: String::new(),
        };
        self.file(relative, &fixture.render())
    }

    /// Create an empty directory.
    pub fn dir(&self, relative: &str) -> Result<PathBuf> {
        let path = self.path(relative);
        fs::create_dir_all(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        Ok(path)
    }
}
