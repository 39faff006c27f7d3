//! JSON process loader.
//!
//! Accepts either a bare array of process records or an object with a
//! `processes` array:
//!
//! ```json
//! [
//!   { "id": "P1", "name": "Cut", "expectedTimeInMin": 0.4,
//!     "machineType": "Cutter", "dependency": [] }
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{AllocationError, Result};
use crate::models::{Process, ProcessTable};

#[derive(Deserialize)]
#[serde(untagged)]
enum ProcessFile {
    List(Vec<Process>),
    Wrapped { processes: Vec<Process> },
}

impl ProcessFile {
    fn into_processes(self) -> Vec<Process> {
        match self {
            Self::List(processes) | Self::Wrapped { processes } => processes,
        }
    }
}

/// Loads and validates a process table from a JSON file.
///
/// # Errors
/// - [`AllocationError::InputUnavailable`] when the file is missing,
///   unreadable, not valid process JSON or holds no records.
/// - [`AllocationError::InvalidTable`] when the records break table rules.
pub fn load_processes(path: impl AsRef<Path>) -> Result<ProcessTable> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        AllocationError::input_unavailable_with_source(path, "cannot read file", e)
    })?;
    let table = parse_at(&content, path)?;
    debug!(path = %path.display(), processes = table.len(), "loaded process table");
    Ok(table)
}

/// Parses and validates a process table from JSON text.
pub fn parse_processes(json: &str) -> Result<ProcessTable> {
    parse_at(json, Path::new("<inline>"))
}

fn parse_at(json: &str, origin: &Path) -> Result<ProcessTable> {
    let file: ProcessFile = serde_json::from_str(json).map_err(|e| {
        AllocationError::input_unavailable_with_source(origin, "invalid process JSON", e)
    })?;
    let processes = file.into_processes();
    if processes.is_empty() {
        return Err(AllocationError::input_unavailable(origin, "no process records"));
    }
    ProcessTable::new(processes)
}
