//! Bounded parallel file processing.
//!
//! Reading and extracting many small source files is I/O bound, so each file is
//! handled on tokio's blocking pool while at most `limit` files are in flight.
//!
//! # Examples
//!
//! ```rust,no_run
//! use calcdeps_cli::utils::fs::parallel::process_files_parallel;
//! use std::path::PathBuf;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let paths = vec![PathBuf::from("a.js"), PathBuf::from("b.js")];
//! let sizes = process_files_parallel(&paths, 8, |_path, bytes| bytes.len()).await?;
//! for (path, size) in sizes {
//!     println!("{}: {:?}", path.display(), size.ok());
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Read every file and run `process` on its bytes, with bounded concurrency.
///
/// # Ordering
///
/// Work completes in any order, but the returned vector is sorted back into
/// the order of `paths`, so callers can merge results deterministically.
///
/// # Error Handling
///
/// A file that cannot be read yields an `Err` in its own slot; the other files
/// are still processed. Only a panicked or cancelled worker task fails the
/// whole call.
///
/// A `limit` of zero is treated as one.
pub async fn process_files_parallel<T, F>(
    paths: &[PathBuf],
    limit: usize,
    process: F,
) -> Result<Vec<(PathBuf, io::Result<T>)>>
where
    T: Send + 'static,
    F: Fn(&Path, Vec<u8>) -> T + Send + Sync + 'static,
{
    if paths.is_empty() {
        return Ok(Vec::new());
    }

    let process = Arc::new(process);
    let limit = limit.max(1);

    let joined: Vec<_> = stream::iter(paths.iter().cloned().enumerate())
        .map(|(index, path)| {
            let process = Arc::clone(&process);
            async move {
                let task_path = path.clone();
                let result = tokio::task::spawn_blocking(move || {
                    fs::read(&task_path).map(|bytes| process(&task_path, bytes))
                })
                .await;
                (index, path, result)
            }
        })
        .buffer_unordered(limit)
        .collect()
        .await;

    let mut results = Vec::with_capacity(joined.len());
    for (index, path, result) in joined {
        let outcome = result
            .with_context(|| format!("Failed to join file read task for {}", path.display()))?;
        results.push((index, path, outcome));
    }

    // Sort results by original index to maintain order
    results.sort_by_key(|(index, _, _)| *index);
    Ok(results.into_iter().map(|(_, path, outcome)| (path, outcome)).collect())
}
