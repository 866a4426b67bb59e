//! Integration test suite for calcdeps
//!
//! These tests drive the whole pipeline, both through the library API and
//! through the `calcdeps` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: the binary, its flags, output modes and exit status
//! - **pipeline**: ordering, deps, excludes and failure modes via [`calculate`]
//! - **settings**: settings file and environment precedence
//!
//! [`calculate`]: calcdeps_cli::resolver::calculate

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod pipeline;
mod settings;
