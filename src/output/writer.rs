//! Rendering projections to bytes and writing them out.
//!
//! Output is assembled completely in memory before anything is written, so a
//! failure part-way (an unreadable script segment, for instance) leaves no
//! partial output behind.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tokio::fs;
use tracing::debug;

use super::{DepsRecord, Projection};
use crate::constants::DEPS_BANNER;
use crate::utils::fs::atomic_write;

/// Render a projection to the bytes that will be written.
///
/// # Errors
///
/// Fails if a script segment cannot be read.
pub async fn render(projection: &Projection) -> Result<Vec<u8>> {
    match projection {
        Projection::List(paths) => {
            let mut out = String::new();
            for path in paths {
                out.push_str(path);
                out.push('\n');
            }
            Ok(out.into_bytes())
        }
        Projection::Deps(records) => render_deps(records).map(String::into_bytes),
        Projection::Script(segments) => {
            let mut out = Vec::new();
            for segment in segments {
                let bytes = fs::read(&segment.path)
                    .await
                    .with_context(|| format!("Failed to read {} for script output", segment.display_path))?;
                out.extend_from_slice(segment.marker.as_bytes());
                out.extend_from_slice(&bytes);
            }
            Ok(out)
        }
    }
}

/// Render a deps file: the banner, then one `goog.addDependency` per record.
pub fn render_deps(records: &[DepsRecord]) -> Result<String> {
    let mut out = String::from(DEPS_BANNER);
    out.push('\n');
    for record in records {
        let path = serde_json::to_string(&record.relative_path)?;
        let provide = serde_json::to_string(&record.provide)?;
        let require = serde_json::to_string(&record.require)?;
        out.push_str(&format!("goog.addDependency({path}, {provide}, {require});\n"));
    }
    Ok(out)
}

/// Write rendered output to `destination`, or stdout when `None`.
///
/// Files are written atomically and their parent directories created.
pub fn write_output(bytes: &[u8], destination: Option<&Path>) -> Result<()> {
    match destination {
        Some(path) => {
            atomic_write(path, bytes).with_context(|| format!("Failed to write output to {}", path.display()))?;
            debug!("Wrote {} byte(s) to {}", bytes.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes).context("Failed to write output to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
