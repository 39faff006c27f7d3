//! Dependency-respecting allocation.
//!
//! # Algorithm
//!
//! 1. Seed: the first unallocated row (table order) whose dependencies are
//!    all allocated.
//! 2. Fill: one pass over the table adding unallocated rows with the seed's
//!    machine type, satisfied dependencies, and room under the target.
//!    Rows are marked allocated as soon as they join, so later candidates
//!    in the same pass see them.
//! 3. Close the station (one machine) and repeat until every row is placed
//!    or no seed exists.
//!
//! # Complexity
//! O(n² · d) where n = processes, d = dependencies per process.

use tracing::debug;

use super::AllocatorConfig;
use crate::models::{station_label, Allocation, MachinePolicy, OpenStation, ProcessTable};

/// Allocation state over table rows.
///
/// Dependencies are resolved to row indices once, so feasibility checks
/// never touch ids. Callers must have run dependency validation first;
/// unknown ids are skipped here.
struct RowState<'a> {
    table: &'a ProcessTable,
    deps: Vec<Vec<usize>>,
    allocated: Vec<bool>,
    remaining: usize,
}

impl<'a> RowState<'a> {
    fn new(table: &'a ProcessTable) -> Self {
        let deps = table
            .iter()
            .map(|p| {
                p.dependency
                    .iter()
                    .filter_map(|d| table.index_of(d))
                    .collect()
            })
            .collect();

        Self {
            table,
            deps,
            allocated: vec![false; table.len()],
            remaining: table.len(),
        }
    }

    fn is_ready(&self, row: usize) -> bool {
        !self.allocated[row] && self.deps[row].iter().all(|&d| self.allocated[d])
    }

    fn mark(&mut self, row: usize) {
        debug_assert!(!self.allocated[row]);
        self.allocated[row] = true;
        self.remaining -= 1;
    }

    fn next_seed(&self) -> Option<usize> {
        (0..self.allocated.len()).find(|&row| self.is_ready(row))
    }

    fn unallocated_ids(&self) -> Vec<String> {
        self.table
            .iter()
            .zip(&self.allocated)
            .filter(|&(_, &done)| !done)
            .map(|(p, _)| p.id.clone())
            .collect()
    }
}

/// Runs the dependency-respecting allocation.
///
/// Rows that can never become ready (cyclic dependencies) are returned in
/// [`Allocation::unallocated`].
pub(crate) fn allocate(table: &ProcessTable, config: &AllocatorConfig) -> Allocation {
    let target = config.throughput_target;
    let slack = config.slack();
    let processes = table.processes();

    let mut state = RowState::new(table);
    let mut allocation = Allocation::new();

    while state.remaining > 0 {
        let Some(seed) = state.next_seed() else {
            break;
        };
        let machine_type = processes[seed].machine_type.as_str();
        let mut station = OpenStation::seeded(seed, processes[seed].expected_time_min);
        state.mark(seed);

        for (row, p) in processes.iter().enumerate() {
            if p.machine_type == machine_type
                && state.is_ready(row)
                && station.fits(p.expected_time_min, target, slack)
            {
                station.push(row, p.expected_time_min);
                state.mark(row);
            }
        }

        let label = station_label(allocation.station_count() + 1);
        let station = station.close(label, table, target, MachinePolicy::Single);
        debug!(
            station = %station.station_id,
            machine_type,
            processes = ?station.process_ids(),
            total = station.total_expected_time,
            "closed station"
        );
        allocation.add_station(station);
    }

    allocation.unallocated = state.unallocated_ids();
    allocation
}
