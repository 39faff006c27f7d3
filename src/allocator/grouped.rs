//! Machine-type grouped allocation (dependencies ignored).
//!
//! Rows are bucketed by machine type; buckets are visited in ascending
//! machine-type order and rows keep table order inside a bucket. Each
//! bucket is packed next-fit: one open station at a time, closed on overflow.

use std::collections::BTreeMap;

use tracing::debug;

use super::AllocatorConfig;
use crate::models::{station_label, Allocation, MachinePolicy, OpenStation, ProcessTable};

/// Row indices per machine type, in table order.
fn group_rows(table: &ProcessTable) -> BTreeMap<&str, Vec<usize>> {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (row, p) in table.iter().enumerate() {
        groups.entry(p.machine_type.as_str()).or_default().push(row);
    }
    groups
}

/// Runs the grouped allocation. Every row ends up in exactly one station.
pub(crate) fn allocate(table: &ProcessTable, config: &AllocatorConfig) -> Allocation {
    let target = config.throughput_target;
    let slack = config.slack();
    let processes = table.processes();

    let mut allocation = Allocation::new();
    let close = |station: OpenStation, allocation: &mut Allocation| {
        let label = station_label(allocation.station_count() + 1);
        let station = station.close(label, table, target, MachinePolicy::CeilDuration);
        debug!(
            station = %station.station_id,
            processes = ?station.process_ids(),
            total = station.total_expected_time,
            machines = station.machines_required,
            "closed station"
        );
        allocation.add_station(station);
    };

    for (machine_type, rows) in group_rows(table) {
        debug!(machine_type, rows = rows.len(), "packing machine group");
        let mut station = OpenStation::default();

        for row in rows {
            let duration = processes[row].expected_time_min;
            if !station.is_empty() && !station.fits(duration, target, slack) {
                close(std::mem::take(&mut station), &mut allocation);
            }
            station.push(row, duration);
        }

        if !station.is_empty() {
            close(station, &mut allocation);
        }
    }

    allocation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::AllocationSummary;
    use crate::models::Process;

    fn config(target: f64) -> AllocatorConfig {
        AllocatorConfig::new()
            .with_respect_dependencies(false)
            .with_throughput_target(target)
    }

    fn ids(allocation: &Allocation) -> Vec<Vec<&str>> {
        allocation.stations.iter().map(|s| s.process_ids()).collect()
    }

    #[test]
    fn test_split_on_overflow() {
        let table = ProcessTable::new(vec![
            Process::new("P1", 0.6, "M1"),
            Process::new("P2", 0.6, "M1"),
        ])
        .unwrap();

        let alloc = allocate(&table, &config(1.0));
        assert_eq!(ids(&alloc), vec![vec!["P1"], vec!["P2"]]);
        assert!(alloc.stations.iter().all(|s| s.machines_required == 1));
        assert!((alloc.stations[0].waste_time - 0.4).abs() < 1e-10);
    }

    #[test]
    fn test_groups_in_machine_type_order() {
        let table = ProcessTable::new(vec![
            Process::new("z1", 0.3, "Zigzag"),
            Process::new("a1", 0.3, "Awl"),
            Process::new("z2", 0.3, "Zigzag"),
            Process::new("a2", 0.3, "Awl"),
        ])
        .unwrap();

        let alloc = allocate(&table, &config(1.0));
        assert_eq!(ids(&alloc), vec![vec!["a1", "a2"], vec!["z1", "z2"]]);
        let labels: Vec<_> = alloc.stations.iter().map(|s| s.station_id.as_str()).collect();
        assert_eq!(labels, vec!["S1", "S2"]);
    }

    #[test]
    fn test_dependencies_ignored() {
        let table = ProcessTable::new(vec![
            Process::new("B", 0.3, "M1").with_dependency("A"),
            Process::new("A", 0.3, "M1").with_dependency("missing"),
        ])
        .unwrap();

        let alloc = allocate(&table, &config(1.0));
        assert_eq!(ids(&alloc), vec![vec!["B", "A"]]);
    }

    #[test]
    fn test_no_backfill_after_close() {
        // The open station closes on overflow; later small rows do not return to it
        let table = ProcessTable::new(vec![
            Process::new("A", 0.7, "M1"),
            Process::new("B", 0.5, "M1"),
            Process::new("C", 0.2, "M1"),
        ])
        .unwrap();

        let alloc = allocate(&table, &config(1.0));
        assert_eq!(ids(&alloc), vec![vec!["A"], vec!["B", "C"]]);
    }

    #[test]
    fn test_ceil_machine_count() {
        let table = ProcessTable::new(vec![
            Process::new("A", 1.5, "M1"),
            Process::new("B", 0.8, "M1"),
            Process::new("C", 0.9, "M1"),
        ])
        .unwrap();

        let alloc = allocate(&table, &config(2.5));
        assert_eq!(ids(&alloc), vec![vec!["A", "B"], vec!["C"]]);
        assert_eq!(alloc.stations[0].machines_required, 3); // ceil(2.3)
        assert_eq!(alloc.stations[1].machines_required, 1);
    }

    #[test]
    fn test_oversized_first_row_is_not_an_empty_station() {
        let table = ProcessTable::new(vec![
            Process::new("big", 1.5, "M1"),
            Process::new("small", 0.2, "M1"),
        ])
        .unwrap();

        let alloc = allocate(&table, &config(1.0));
        assert_eq!(ids(&alloc), vec![vec!["big"], vec!["small"]]);
        assert_eq!(alloc.stations[0].machines_required, 2);
        assert!((alloc.stations[0].waste_time + 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_zero_duration_rows() {
        let table = ProcessTable::new(vec![
            Process::new("inspect", 0.0, "Eye"),
            Process::new("tag", 0.0, "Eye"),
        ])
        .unwrap();

        let alloc = allocate(&table, &config(1.0));
        assert_eq!(ids(&alloc), vec![vec!["inspect", "tag"]]);
        assert_eq!(alloc.stations[0].machines_required, 0);
    }

    #[test]
    fn test_machine_count_beyond_u32() {
        let table = ProcessTable::new(vec![
            Process::new("cure", 5.0e9, "Oven"),
            Process::new("dry", 3.0e9, "Rack"),
        ])
        .unwrap();

        let alloc = allocate(&table, &config(1.0));
        assert_eq!(alloc.stations[0].machines_required, 5_000_000_000);
        assert_eq!(alloc.stations[1].machines_required, 3_000_000_000);
        assert_eq!(
            AllocationSummary::calculate(&alloc).total_machines_required,
            8_000_000_000
        );
    }
}
