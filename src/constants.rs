//! Global constants used throughout the calcdeps codebase.

/// Minimum number of parallel file operations regardless of CPU count.
pub const MIN_PARALLELISM: usize = 10;

/// Multiplier applied to CPU core count for default parallelism.
pub const PARALLELISM_CORE_MULTIPLIER: usize = 2;

/// Default CPU core count when detection fails.
///
/// Used as a fallback when `std::thread::available_parallelism()` returns an error.
pub const FALLBACK_CORE_COUNT: usize = 4;

/// Source extensions recognised when walking directories.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js"];

/// First line of a generated deps file.
pub const DEPS_BANNER: &str = "// This file was autogenerated by calcdeps.js";

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "CALCDEPS_CONFIG";

/// Environment variable overriding the worker pool bound.
pub const MAX_PARALLEL_ENV: &str = "CALCDEPS_MAX_PARALLEL";

/// Default worker pool bound: `max(10, 2 × cores)`.
#[must_use]
pub fn default_max_parallel() -> usize {
    let cores = std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(FALLBACK_CORE_COUNT);
    std::cmp::max(MIN_PARALLELISM, cores * PARALLELISM_CORE_MULTIPLIER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_max_parallel_has_floor() {
        assert!(default_max_parallel() >= MIN_PARALLELISM);
    }
}
