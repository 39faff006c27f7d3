//! Error type shared by the allocator and its I/O collaborators.
//!
//! Every failure is fatal to a run: validation problems are detected before
//! any station is computed, and I/O failures abort before (loading) or after
//! (writing) the allocation itself.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::validation::ValidationError;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, AllocationError>;

/// The unified error type for station allocation.
#[derive(Error, Debug)]
pub enum AllocationError {
    /// Process data could not be read or parsed.
    #[error("process data unavailable at '{}': {message}", .path.display())]
    InputUnavailable {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The process records violate table invariants (duplicate ids, bad durations).
    #[error("invalid process table: {}", describe_issues(.0))]
    InvalidTable(Vec<ValidationError>),

    /// A dependency references a process id that is not in the table.
    #[error("process '{process_id}' has invalid dependency: '{dependency_id}'")]
    InvalidDependency {
        process_id: String,
        dependency_id: String,
    },

    /// Throughput target is zero, negative or not finite.
    #[error("throughput target must be a positive finite number of minutes, got {0}")]
    InvalidThroughputTarget(f64),

    /// Strict mode only: the dependency graph left processes unplaceable.
    #[error(
        "{} process(es) could not be allocated: {}",
        .process_ids.len(),
        .process_ids.join(", ")
    )]
    Unallocated { process_ids: Vec<String> },

    /// An output artefact could not be written.
    #[error("failed to write '{}'", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The allocation could not be serialized.
    #[error("failed to serialize allocation")]
    Serialize(#[from] serde_json::Error),
}

impl AllocationError {
    /// Creates an input error without an underlying cause.
    pub fn input_unavailable(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::InputUnavailable {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates an input error wrapping the failure that caused it.
    pub fn input_unavailable_with_source<E>(
        path: impl AsRef<Path>,
        message: impl Into<String>,
        source: E,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::InputUnavailable {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an invalid dependency error.
    pub fn invalid_dependency(
        process_id: impl Into<String>,
        dependency_id: impl Into<String>,
    ) -> Self {
        Self::InvalidDependency {
            process_id: process_id.into(),
            dependency_id: dependency_id.into(),
        }
    }

    /// Creates an output error for the given path.
    pub fn output(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Process ids this error points at, if any.
    pub fn process_ids(&self) -> Vec<&str> {
        match self {
            Self::InvalidDependency { process_id, .. } => vec![process_id.as_str()],
            Self::Unallocated { process_ids } => process_ids.iter().map(String::as_str).collect(),
            Self::InvalidTable(issues) => issues.iter().map(|i| i.process_id.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

fn describe_issues(issues: &[ValidationError]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
