//! Command-line interface for calcdeps.
//!
//! `calcdeps` is a single command: it scans source trees, orders the files an
//! input needs, and prints the result in one of three shapes.
//!
//! # Usage
//!
//! ```bash
//! calcdeps -i src/app.js -p src -d closure/goog
//! calcdeps -i src/app.js -p src -o script --output_file build/app.js
//! calcdeps -i src/app.js -p src -p third_party -o deps > deps.js
//! ```
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//! - `--config` - Path to a settings file
//!
//! # Environment Variables
//!
//! - `CALCDEPS_CONFIG` - Settings file used when `--config` is absent
//! - `CALCDEPS_MAX_PARALLEL` - Worker pool bound used when `--max-parallel` is absent
//! - `RUST_LOG` - Log filter; overrides `--verbose` and `--quiet`
//!
//! # Output
//!
//! The result goes to stdout unless `--output_file` is given. Logs and
//! warnings always go to stderr, so stdout can be redirected into a file safely.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::{CalcOptions, OutputMode, Settings, parse_max_parallel};
use crate::constants::{CONFIG_ENV, MAX_PARALLEL_ENV, default_max_parallel};
use crate::output::{project, render, write_output};
use crate::resolver::calculate;

/// Calculate Closure-style source dependencies.
///
/// Flags mirror the classic `calcdeps` tool: `--output_mode` and
/// `--output_file` keep their underscores, with dashed aliases.
#[derive(Parser, Debug)]
#[command(
    name = "calcdeps",
    about = "Calculate JavaScript dependencies from goog.provide/goog.require declarations",
    version,
    long_about = "calcdeps scans source trees for goog.provide, goog.module and goog.require \
                  declarations and prints the files an input needs, in load order."
)]
pub struct Cli {
    /// File or directory to calculate dependencies for (repeatable).
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: Vec<PathBuf>,

    /// Root searched for providers (repeatable, default `.`).
    #[arg(short = 'p', long = "path", value_name = "PATH")]
    pub path: Vec<PathBuf>,

    /// File or directory whose namespaces are already loaded (repeatable).
    ///
    /// Deps satisfy requires but are never printed.
    #[arg(short = 'd', long = "dep", value_name = "PATH")]
    pub dep: Vec<PathBuf>,

    /// Existing path or glob pattern to leave out of scanning (repeatable).
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Output shape: `list`, `script` or `deps`.
    ///
    /// Unrecognised values fall back to `list`.
    #[arg(
        short = 'o',
        long = "output_mode",
        visible_alias = "output-mode",
        value_name = "MODE",
        default_value = "list"
    )]
    pub output_mode: String,

    /// Write the result here instead of stdout.
    #[arg(long = "output_file", visible_alias = "output-file", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Directory that output paths are relative to (default: working directory).
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Report unresolved requires as warnings instead of failing.
    #[arg(long)]
    pub lenient: bool,

    /// Maximum number of files read concurrently.
    #[arg(long, value_name = "N")]
    pub max_parallel: Option<usize>,

    /// Settings file (default: `<config dir>/calcdeps/config.toml`).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Run the calculation and write the result.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error; nothing is written in that case.
    pub async fn execute(self) -> Result<()> {
        let options = self.build_options().await?;
        let calculation = calculate(&options).await?;

        if !calculation.diagnostics.is_empty() {
            debug!("{} warning(s) collected", calculation.diagnostics.len());
        }

        let projection = project(&calculation, options.output_mode);
        let bytes = render(&projection).await?;
        write_output(&bytes, self.output_file.as_deref())
    }

    /// Load settings and the environment, and merge them with the flags.
    pub async fn build_options(&self) -> Result<CalcOptions> {
        let env_config = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let settings = Settings::load_with_optional(self.config.clone(), env_config).await?;
        let env_parallel = std::env::var(MAX_PARALLEL_ENV).ok();
        self.merge_options(settings, env_parallel.as_deref())
    }

    /// Merge flags over the environment over the settings file.
    ///
    /// # Errors
    ///
    /// Fails when `env_parallel` is not a positive integer.
    pub fn merge_options(&self, settings: Settings, env_parallel: Option<&str>) -> Result<CalcOptions> {
        let env_parallel = env_parallel.map(parse_max_parallel).transpose()?;
        let max_parallel = self
            .max_parallel
            .or(env_parallel)
            .or(settings.max_parallel)
            .unwrap_or_else(default_max_parallel);

        let paths = if self.path.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.path.clone()
        };

        let mut excludes = self.exclude.clone();
        excludes.extend(settings.exclude);

        let mut options = CalcOptions::new(self.input.clone())
            .with_paths(paths)
            .with_deps(self.dep.clone())
            .with_excludes(excludes)
            .with_output_mode(OutputMode::from_name(&self.output_mode))
            .lenient(self.lenient || settings.lenient.unwrap_or(false))
            .with_max_parallel(max_parallel);

        if let Some(extensions) = settings.extensions {
            options = options.with_extensions(extensions);
        }
        if let Some(base_dir) = &self.base_dir {
            options = options.with_base_dir(base_dir);
        }

        Ok(options)
    }

    /// Default log filter for the verbosity flags.
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` takes precedence over the verbosity flags.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.log_filter()));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}
