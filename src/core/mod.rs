//! Core types for calcdeps
//!
//! This module holds the types every pipeline stage shares:
//!
//! - [`CalcDepsError`] / [`ErrorContext`] / [`user_friendly_error`] - fatal errors
//!   and their user-facing rendering
//! - [`Diagnostics`] / [`Warning`] - non-fatal issues collected along the way
//! - [`SourceFile`] / [`FileId`] / [`Namespace`] - the data model
//!
//! # Error Handling Pattern
//!
//! ```rust,no_run
//! use calcdeps_cli::core::{CalcDepsError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn example_operation() -> Result<()> {
//!     Err(CalcDepsError::NoInputs.into())
//! }
//!
//! if let Err(e) = example_operation() {
//!     user_friendly_error(e).display();
//! }
//! ```

pub mod diagnostics;
pub mod error;
pub mod source;

pub use diagnostics::{Diagnostics, Warning, WarningKind};
pub use error::{CalcDepsError, ErrorContext, user_friendly_error};
pub use source::{FileId, Namespace, SourceFile};
