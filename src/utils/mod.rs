//! Cross-platform utilities shared by the pipeline stages.

pub mod fs;

pub use fs::{atomic_write, display_path};
