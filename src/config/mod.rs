//! Configuration for calcdeps.
//!
//! Configuration comes from three layers, highest precedence first:
//!
//! 1. Command-line flags
//! 2. Environment variables (`CALCDEPS_CONFIG`, `CALCDEPS_MAX_PARALLEL`)
//! 3. The settings file ([`Settings`])
//!
//! The layers are merged by the CLI into a single immutable [`CalcOptions`].

pub mod global;
pub mod options;

pub use global::{Settings, parse_max_parallel};
pub use options::{CalcOptions, OutputMode};
