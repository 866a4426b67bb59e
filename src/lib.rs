//! calcdeps - dependency calculator for Closure-style JavaScript
//!
//! Source files declare what they define with `goog.provide('ns')` (or
//! `goog.module('ns')`) and what they need with `goog.require('ns')`. Given one
//! or more input files and the trees to search, calcdeps finds every file the
//! inputs transitively need and prints them in an order where each provider
//! comes before the files that require it.
//!
//! # Architecture Overview
//!
//! The pipeline runs once per invocation, leaf-first:
//!
//! - **Scanner** turns `--input`, `--path` and `--dep` specs into canonical
//!   candidate files
//! - **Extractor** pulls provide and require declarations out of each file
//! - **Namespace index** maps every namespace to its provider; deps form an
//!   overlay that is already satisfied
//! - **Resolver** walks requires depth-first from each input and emits files in
//!   post-order
//! - **Projector** shapes the order as a path list, a deps file or a script
//!
//! ## Key Features
//!
//! - **Deterministic**: output depends only on input order and declaration order
//! - **Concurrent**: files are read and parsed on a bounded worker pool
//! - **Fail-fast**: duplicate providers, cycles and missing namespaces stop the
//!   run before anything is written
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface
//! - [`config`] - Options, settings file and environment merging
//! - [`core`] - Source file model, errors and warnings
//! - [`extractor`] - Declaration extraction
//! - [`scanner`] - Path specification scanning
//! - [`resolver`] - Namespace index and dependency ordering
//! - [`output`] - Projection and rendering of results
//!
//! ## Supporting Modules
//! - [`pattern`] - Exclusion paths and glob patterns
//! - [`utils`] - Path rendering, atomic writes and parallel file processing
//! - [`constants`] - Defaults shared across modules
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Ordered list of files app.js needs, searching src/
//! calcdeps -i src/app.js -p src
//!
//! # Same, treating the Closure Library as already loaded
//! calcdeps -i src/app.js -p src -d closure/goog
//!
//! # Generate a deps file
//! calcdeps -i src/app.js -p src -o deps --output_file build/deps.js
//!
//! # Concatenate everything into one script
//! calcdeps -i src/app.js -p src -p closure -o script > build/app.js
//! ```

// Core functionality modules
pub mod cli;
pub mod config;
pub mod core;
pub mod resolver;

// Pipeline stages
pub mod extractor;
pub mod output;
pub mod scanner;

// Supporting modules
pub mod constants;
pub mod pattern;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
