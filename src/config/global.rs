//! Settings file for calcdeps.
//!
//! The settings file holds defaults that are tedious to repeat on every
//! invocation. It is optional; every key is optional.
//!
//! # Location
//!
//! 1. `--config <FILE>`
//! 2. `CALCDEPS_CONFIG` environment variable
//! 3. `<config dir>/calcdeps/config.toml` (e.g. `~/.config/calcdeps/config.toml`)
//!
//! An explicitly named file must exist. The default location is only read when
//! it exists.
//!
//! # Format
//!
//! ```toml
//! extensions = ["js"]          # recognised source extensions
//! max_parallel = 16            # worker pool bound
//! lenient = false              # unresolved requires become warnings
//! exclude = ["**/*_test.js"]   # appended to --exclude
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::core::CalcDepsError;

/// Contents of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Recognised source extensions, without the dot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    /// Worker pool bound for scanning and extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parallel: Option<usize>,

    /// Treat unresolved requires as warnings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lenient: Option<bool>,

    /// Exclusion specs appended to the command-line excludes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl Settings {
    /// Load settings from an explicit path, the environment, or the default location.
    ///
    /// `explicit` is the `--config` flag; `env_path` is the value of
    /// `CALCDEPS_CONFIG`. Either one must name an existing file. Without
    /// either, the default location is used when present and an empty
    /// [`Settings`] is returned otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if a named file is missing, unreadable, or not valid TOML.
    pub async fn load_with_optional(
        explicit: Option<PathBuf>,
        env_path: Option<PathBuf>,
    ) -> Result<Self> {
        if let Some(path) = explicit.or(env_path) {
            return Self::load_from(&path).await;
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path).await,
            _ => Ok(Self::default()),
        }
    }

    /// Load settings from a specific file path.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use calcdeps_cli::config::Settings;
    /// use std::path::Path;
    ///
    /// # async fn example() -> anyhow::Result<()> {
    /// let settings = Settings::load_from(Path::new("calcdeps.toml")).await?;
    /// println!("max_parallel = {:?}", settings.max_parallel);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading settings from {}", path.display());
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;

        if settings.max_parallel == Some(0) {
            return Err(CalcDepsError::ConfigError {
                message: format!("max_parallel must be at least 1 in {}", path.display()),
            }
            .into());
        }

        Ok(settings)
    }

    /// Default settings file location, if the platform has a config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("calcdeps").join("config.toml"))
    }
}

/// Parse a `CALCDEPS_MAX_PARALLEL` value.
///
/// # Errors
///
/// Returns [`CalcDepsError::ConfigError`] when the value is not a positive integer.
pub fn parse_max_parallel(value: &str) -> Result<usize, CalcDepsError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CalcDepsError::ConfigError {
            message: format!("max parallel must be a positive integer, got '{value}'"),
        }),
    }
}
