//! File system utilities
//!
//! - [`atomic`] - temp-file-and-rename writes for generated output
//! - [`parallel`] - bounded concurrent read-and-process of many files
//! - [`paths`] - canonicalization and user-facing path rendering

pub mod atomic;
pub mod parallel;
pub mod paths;

pub use atomic::atomic_write;
pub use parallel::process_files_parallel;
pub use paths::{canonicalize, display_path, path_to_storage};
