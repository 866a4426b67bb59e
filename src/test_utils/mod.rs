//! Test utilities for calcdeps
//!
//! This module provides helpers for writing tests: temporary source trees and
//! one-time logging setup.
//!
//! # Example
//!
//! ```rust,no_run
//! use calcdeps_cli::test_utils::SourceTree;
//!
//! let tree = SourceTree::new().unwrap();
//! tree.js("a.js", &["ns.a"], &["ns.b"]).unwrap();
//! tree.js("b.js", &["ns.b"], &[]).unwrap();
//! ```

pub mod fixtures;

pub use fixtures::{JsFixture, SourceTree};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// # Example
///
/// ```rust,no_run
/// use tracing::Level;
///
/// calcdeps_cli::test_utils::init_test_logging(Some(Level::DEBUG));
/// ```
///
/// To enable logging in tests via environment variable:
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
