//! Error handling for calcdeps
//!
//! This module provides the error types and user-friendly error reporting for the
//! dependency calculator. The error system follows two principles:
//! 1. **Strongly-typed errors** so callers can react to a specific failure
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`CalcDepsError`] - Enumerated error types for every fatal failure
//! - [`ErrorContext`] - Wrapper that adds suggestions and details for display
//!
//! Plumbing code returns [`anyhow::Result`] and attaches context with
//! `.with_context(...)`. Domain failures are raised as [`CalcDepsError`] so that
//! [`user_friendly_error`] can downcast them and pick a tailored suggestion.
//!
//! # Fatal vs. non-fatal
//!
//! Everything in this module is fatal: the pipeline stops and nothing is written.
//! Recoverable problems (a malformed declaration, an unreadable candidate that
//! nobody asked for by name) are collected as [`Warning`](super::Warning)s instead.
//!
//! # Examples
//!
//! ```rust,no_run
//! use calcdeps_cli::core::{CalcDepsError, user_friendly_error};
//!
//! let error = CalcDepsError::UnresolvedRequire {
//!     namespace: "app.missing".to_string(),
//!     file: "src/app.js".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for dependency calculation.
///
/// Variants are grouped by the pipeline stage that raises them:
///
/// ## Scanning
/// - [`ScanError`] - A path named as an input or dep cannot be read
/// - [`NoInputs`] - Nothing to calculate dependencies for
///
/// ## Indexing
/// - [`DuplicateProvider`] - Two scanned files provide the same namespace
///
/// ## Resolution
/// - [`UnresolvedRequire`] - A required namespace has no provider
/// - [`DependencyCycle`] - Files require each other in a loop
/// - [`ExternalInput`] - A requested input is also in the dep set
///
/// ## Configuration and I/O
/// - [`ConfigError`] - Invalid option or settings file
/// - [`IoError`] - Standard I/O errors from [`std::io::Error`]
/// - [`TomlError`] - Settings file syntax errors from [`toml::de::Error`]
///
/// [`ScanError`]: CalcDepsError::ScanError
/// [`NoInputs`]: CalcDepsError::NoInputs
/// [`DuplicateProvider`]: CalcDepsError::DuplicateProvider
/// [`UnresolvedRequire`]: CalcDepsError::UnresolvedRequire
/// [`DependencyCycle`]: CalcDepsError::DependencyCycle
/// [`ExternalInput`]: CalcDepsError::ExternalInput
/// [`ConfigError`]: CalcDepsError::ConfigError
/// [`IoError`]: CalcDepsError::IoError
/// [`TomlError`]: CalcDepsError::TomlError
#[derive(Error, Debug)]
pub enum CalcDepsError {
    /// A required path could not be scanned
    ///
    /// Raised for `--input` and `--dep` paths that are missing or unreadable.
    /// Unreadable `--path` roots are only warnings.
    #[error("Cannot scan '{path}': {reason}")]
    ScanError {
        /// The path that could not be read
        path: String,
        /// Why the path could not be read
        reason: String,
    },

    /// No input files were requested
    #[error("No input files to calculate dependencies for")]
    NoInputs,

    /// Two non-external files provide the same namespace
    ///
    /// # Fields
    /// - `namespace`: The namespace provided twice
    /// - `first`: The file that registered the namespace first
    /// - `second`: The file that tried to register it again
    #[error("Namespace '{namespace}' is provided by both '{first}' and '{second}'")]
    DuplicateProvider {
        /// The namespace provided twice
        namespace: String,
        /// File that registered the namespace first
        first: String,
        /// File that tried to register it again
        second: String,
    },

    /// A required namespace has no provider, not even in the dep set
    #[error("Namespace '{namespace}' required by '{file}' is not provided by any file")]
    UnresolvedRequire {
        /// The namespace nobody provides
        namespace: String,
        /// The file that requires it
        file: String,
    },

    /// Circular dependency detected while ordering files
    ///
    /// Example: a.js requires b, b.js requires a
    ///
    /// # Fields
    /// - `chain`: The dependency chain showing the circular reference
    #[error("Circular dependency detected: {chain}")]
    DependencyCycle {
        /// String representation of the circular dependency chain
        chain: String,
    },

    /// A requested input is also part of the externally satisfied set
    #[error("Input '{path}' is also listed as a dep and cannot be an output target")]
    ExternalInput {
        /// The conflicting input file
        path: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for CalcDepsError {
    fn clone(&self) -> Self {
        match self {
            Self::ScanError {
                path,
                reason,
            } => Self::ScanError {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::NoInputs => Self::NoInputs,
            Self::DuplicateProvider {
                namespace,
                first,
                second,
            } => Self::DuplicateProvider {
                namespace: namespace.clone(),
                first: first.clone(),
                second: second.clone(),
            },
            Self::UnresolvedRequire {
                namespace,
                file,
            } => Self::UnresolvedRequire {
                namespace: namespace.clone(),
                file: file.clone(),
            },
            Self::DependencyCycle {
                chain,
            } => Self::DependencyCycle {
                chain: chain.clone(),
            },
            Self::ExternalInput {
                path,
            } => Self::ExternalInput {
                path: path.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // io::Error and toml errors are not Clone; keep the message.
            Self::IoError(e) => Self::IoError(std::io::Error::new(e.kind(), e.to_string())),
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`CalcDepsError`] and adds an optional suggestion and
/// optional details. It is what the binary prints when the pipeline fails.
///
/// # Examples
///
/// ```rust,no_run
/// use calcdeps_cli::core::{CalcDepsError, ErrorContext};
///
/// let context = ErrorContext::new(CalcDepsError::NoInputs)
///     .with_suggestion("Pass at least one --input file or directory")
///     .with_details("calcdeps orders the transitive dependencies of its inputs");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: CalcDepsError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: CalcDepsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions are displayed in green in the terminal.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details are displayed in yellow in the terminal.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognises:
/// - [`CalcDepsError`] variants (tailored suggestions)
/// - [`std::io::Error`] (filesystem guidance)
/// - [`toml::de::Error`] (settings file syntax help)
/// - Anything else (message plus the full cause chain)
///
/// # Examples
///
/// ```rust,no_run
/// use calcdeps_cli::core::user_friendly_error;
///
/// let error = anyhow::anyhow!("Something went wrong");
/// let context = user_friendly_error(error);
/// context.display();
/// ```
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(calc_error) = error.downcast_ref::<CalcDepsError>() {
        return create_error_context(calc_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(CalcDepsError::Other {
                    message: error_with_chain(&error),
                })
                .with_suggestion("Check file ownership and permissions of the scanned paths")
                .with_details("calcdeps only reads source files; it needs read access to every input, dep and path entry");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(CalcDepsError::Other {
                    message: error_with_chain(&error),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(CalcDepsError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of the calcdeps settings file")
        .with_details("Supported keys: extensions, max_parallel, lenient, exclude");
    }

    ErrorContext::new(CalcDepsError::Other {
        message: error_with_chain(&error),
    })
}

/// Render an error and its causes, one numbered cause per line.
fn error_with_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();

    let chain: Vec<String> = error
        .chain()
        .skip(1) // Skip the root cause which is already in to_string()
        .map(std::string::ToString::to_string)
        .collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

/// Create appropriate [`ErrorContext`] with suggestions for specific errors.
fn create_error_context(error: CalcDepsError) -> ErrorContext {
    match &error {
        CalcDepsError::ScanError { path, .. } => {
            let suggestion = format!(
                "Verify that '{path}' exists and is readable, or drop it from --input/--dep"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Paths passed as --input or --dep must be readable; --path roots are scanned best-effort")
        }

        CalcDepsError::NoInputs => ErrorContext::new(error)
            .with_suggestion("Pass at least one --input file or directory")
            .with_details("Inputs that are excluded by --exclude do not count"),

        CalcDepsError::DuplicateProvider { namespace, .. } => {
            let suggestion = format!(
                "Keep a single goog.provide('{namespace}'), or move one of the files into --dep or --exclude"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Each namespace must be provided by exactly one scanned file")
        }

        CalcDepsError::UnresolvedRequire { namespace, .. } => {
            let suggestion = format!(
                "Add the directory that provides '{namespace}' with --path or --dep, or run with --lenient"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Every goog.require must match a goog.provide or goog.module in the scanned or dep files")
        }

        CalcDepsError::DependencyCycle { chain } => {
            let details = format!(
                "Circular dependency chain detected: {chain}. Files cannot require themselves directly or indirectly"
            );
            ErrorContext::new(error)
                .with_suggestion("Break the cycle by moving the shared code into a namespace both files can require")
                .with_details(details)
        }

        CalcDepsError::ExternalInput { .. } => ErrorContext::new(error)
            .with_suggestion("Remove the file from --dep or from --input")
            .with_details("Files in the dep set are treated as already loaded and are never emitted"),

        CalcDepsError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Check the command-line flags and the settings file (--config / CALCDEPS_CONFIG)"),

        _ => ErrorContext::new(error),
    }
}
