//! Process and process table models.
//!
//! A process is the atomic step of the production line: it runs on one
//! machine type for a fixed number of minutes and may require other
//! processes to be placed first.
//!
//! # Time Representation
//! Durations are real-valued minutes, matching the throughput target.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{AllocationError, Result};
use crate::validation::validate_table;

/// An atomic unit of work on the production line.
///
/// Field names follow the input contract of the process loader
/// (`expectedTimeInMin`, `machineType`, `dependency`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Expected duration (minutes, non-negative).
    #[serde(rename = "expectedTimeInMin")]
    pub expected_time_min: f64,
    /// Equipment category required to run this process.
    #[serde(rename = "machineType")]
    pub machine_type: String,
    /// IDs of processes that must be allocated before this one.
    #[serde(default)]
    pub dependency: Vec<String>,
}

impl Process {
    /// Creates a process with no name and no dependencies.
    pub fn new(id: impl Into<String>, expected_time_min: f64, machine_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            expected_time_min,
            machine_type: machine_type.into(),
            dependency: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a dependency on another process.
    pub fn with_dependency(mut self, id: impl Into<String>) -> Self {
        self.dependency.push(id.into());
        self
    }

    /// Replaces the dependency list.
    pub fn with_dependencies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependency = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this process declares any dependency.
    pub fn has_dependencies(&self) -> bool {
        !self.dependency.is_empty()
    }
}

/// Validated, ordered collection of processes for one allocation run.
///
/// Row order is the input order and drives every tie-break in the
/// allocator, so it is never reordered.
#[derive(Debug, Clone, Default)]
pub struct ProcessTable {
    processes: Vec<Process>,
    index: HashMap<String, usize>,
}

impl ProcessTable {
    /// Builds a table, rejecting duplicate ids and invalid durations.
    ///
    /// All issues are collected and reported together in
    /// [`AllocationError::InvalidTable`].
    pub fn new(processes: Vec<Process>) -> Result<Self> {
        validate_table(&processes).map_err(AllocationError::InvalidTable)?;

        let index = processes
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        Ok(Self { processes, index })
    }

    /// Processes in table order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Iterates processes in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Process> {
        self.processes.iter()
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the table holds no processes.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Row index of a process id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Looks up a process by id.
    pub fn get(&self, id: &str) -> Option<&Process> {
        self.index_of(id).map(|i| &self.processes[i])
    }

    /// Whether a process with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Distinct machine types in order of first appearance.
    pub fn machine_types(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for p in &self.processes {
            if !seen.contains(&p.machine_type.as_str()) {
                seen.push(p.machine_type.as_str());
            }
        }
        seen
    }

    /// Total expected time of all processes (minutes).
    pub fn total_expected_time(&self) -> f64 {
        self.processes.iter().map(|p| p.expected_time_min).sum()
    }
}

impl<'a> IntoIterator for &'a ProcessTable {
    type Item = &'a Process;
    type IntoIter = std::slice::Iter<'a, Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}
