//! Input validation for process tables.
//!
//! Checks structural integrity of process records before allocation.
//! Detects:
//! - Duplicate IDs
//! - Negative or non-finite durations
//! - Dependencies on unknown processes
//! - Circular precedence dependencies (diagnostic only)
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{HashMap, HashSet};

use crate::error::{AllocationError, Result};
use crate::models::{Process, ProcessTable};

/// Validation result.
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending process ID.
    pub process_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same ID.
    DuplicateId,
    /// Duration is negative, NaN or infinite.
    InvalidDuration,
}

impl ValidationError {
    /// Creates an issue for `process_id`.
    pub fn new(
        kind: ValidationErrorKind,
        process_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            process_id: process_id.into(),
            message: message.into(),
        }
    }
}

/// Validates raw process records before they become a [`ProcessTable`].
///
/// Checks:
/// 1. No duplicate process IDs
/// 2. Every duration is finite and non-negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_table(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for p in processes {
        if !ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                &p.id,
                format!("Duplicate process ID: {}", p.id),
            ));
        }

        if !p.expected_time_min.is_finite() || p.expected_time_min < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                &p.id,
                format!(
                    "Process '{}' has invalid expected time: {}",
                    p.id, p.expected_time_min
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks that every dependency names a process in the table.
///
/// Processes are visited in table order and dependencies in list order;
/// the first unknown id aborts with [`AllocationError::InvalidDependency`].
pub fn validate_dependencies(table: &ProcessTable) -> Result<()> {
    for p in table {
        if let Some(dep) = p.dependency.iter().find(|d| !table.contains(d.as_str())) {
            return Err(AllocationError::invalid_dependency(&p.id, dep));
        }
    }
    Ok(())
}

/// Returns the IDs of processes lying on a precedence cycle, in table order.
///
/// Dependencies on unknown ids are ignored.
///
/// # Algorithm
/// A process is on a cycle iff a DFS over dependency → dependent edges,
/// started from its own dependents, leads back to it. O(n · (n + e)),
/// which is fine for line-sized tables.
///
/// # Reference
/// Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3 (DFS)
pub fn find_cycles(table: &ProcessTable) -> Vec<String> {
    // Build adjacency list: row → dependent rows
    let mut adj: HashMap<usize, Vec<usize>> = HashMap::new();
    for (row, p) in table.iter().enumerate() {
        for dep in &p.dependency {
            if let Some(dep_row) = table.index_of(dep) {
                adj.entry(dep_row).or_default().push(row);
            }
        }
    }

    table
        .iter()
        .enumerate()
        .filter(|&(row, _)| {
            let mut visited = vec![false; table.len()];
            adj.get(&row).is_some_and(|next| {
                next.iter()
                    .any(|&n| reaches_dfs(n, row, &adj, &mut visited))
            })
        })
        .map(|(_, p)| p.id.clone())
        .collect()
}

fn reaches_dfs(
    node: usize,
    target: usize,
    adj: &HashMap<usize, Vec<usize>>,
    visited: &mut [bool],
) -> bool {
    if node == target {
        return true;
    }
    if visited[node] {
        return false;
    }
    visited[node] = true;

    adj.get(&node).is_some_and(|neighbors| {
        neighbors
            .iter()
            .any(|&next| reaches_dfs(next, target, adj, visited))
    })
}
