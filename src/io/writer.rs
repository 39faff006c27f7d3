//! Allocation and text artefact writers.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{AllocationError, Result};
use crate::models::Allocation;

/// Serializes an allocation as pretty-printed JSON.
pub fn allocation_to_json(allocation: &Allocation) -> Result<String> {
    Ok(serde_json::to_string_pretty(allocation)?)
}

/// Writes an allocation to `path` as pretty-printed JSON.
pub fn write_allocation(allocation: &Allocation, path: impl AsRef<Path>) -> Result<()> {
    let json = allocation_to_json(allocation)?;
    write_text(path, &json)
}

/// Writes a text artefact (report, chart) to `path`.
pub fn write_text(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, content).map_err(|e| AllocationError::output(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "wrote artefact");
    Ok(())
}
