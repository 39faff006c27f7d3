//! Station and allocation result models.
//!
//! A station groups processes executed together within one throughput
//! cycle. The allocation is the ordered list of stations produced by one
//! run, and is the structure handed to the writer, report and chart.

use serde::{Deserialize, Serialize};

use super::{Process, ProcessTable};

/// Id and name of a process placed in a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRef {
    /// Process identifier.
    pub id: String,
    /// Process display name.
    pub name: String,
}

impl From<&Process> for ProcessRef {
    fn from(p: &Process) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
        }
    }
}

/// A batch of processes assigned to one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Sequential label (`S1`, `S2`, ...).
    pub station_id: String,
    /// Members in allocation order.
    pub processes: Vec<ProcessRef>,
    /// Sum of member durations (minutes).
    pub total_expected_time: f64,
    /// `throughput_target - total_expected_time`; negative on overflow.
    pub waste_time: f64,
    /// Machines needed to run this station.
    pub machines_required: u64,
}

impl Station {
    /// Whether the station holds the given process.
    pub fn contains(&self, process_id: &str) -> bool {
        self.processes.iter().any(|p| p.id == process_id)
    }

    /// Member ids in allocation order.
    pub fn process_ids(&self) -> Vec<&str> {
        self.processes.iter().map(|p| p.id.as_str()).collect()
    }

    /// Number of member processes.
    pub fn process_count(&self) -> usize {
        self.processes.len()
    }
}

/// How many machines a closed station reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachinePolicy {
    /// One machine per station (single operator).
    Single,
    /// `ceil(total_expected_time)` machines working in parallel.
    CeilDuration,
}

impl MachinePolicy {
    /// Machine count for a station with the given total time.
    pub fn machines_for(self, total_expected_time: f64) -> u64 {
        match self {
            Self::Single => 1,
            Self::CeilDuration => total_expected_time.max(0.0).ceil() as u64,
        }
    }
}

/// A station still accepting processes.
///
/// Tracks table row indices and the running duration; [`OpenStation::close`]
/// turns it into an immutable [`Station`].
#[derive(Debug, Clone, Default)]
pub(crate) struct OpenStation {
    members: Vec<usize>,
    total: f64,
}

impl OpenStation {
    /// Opens a station seeded with one row.
    pub(crate) fn seeded(row: usize, duration: f64) -> Self {
        Self {
            members: vec![row],
            total: duration,
        }
    }

    pub(crate) fn push(&mut self, row: usize, duration: f64) {
        self.members.push(row);
        self.total += duration;
    }

    /// Whether adding `duration` keeps the total within `target + tolerance`.
    pub(crate) fn fits(&self, duration: f64, target: f64, tolerance: f64) -> bool {
        self.total + duration <= target + tolerance
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn close(
        self,
        station_id: String,
        table: &ProcessTable,
        throughput_target: f64,
        policy: MachinePolicy,
    ) -> Station {
        let processes = table.processes();
        Station {
            station_id,
            processes: self.members.iter().map(|&i| ProcessRef::from(&processes[i])).collect(),
            total_expected_time: self.total,
            waste_time: throughput_target - self.total,
            machines_required: policy.machines_for(self.total),
        }
    }
}

/// Result of one allocation run.
///
/// Serializes as `{ "stations": [...] }`; `unallocated` only appears when
/// the dependency graph left processes unplaceable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Stations in allocation order.
    pub stations: Vec<Station>,
    /// Process ids that could not be placed, in table order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unallocated: Vec<String>,
}

impl Allocation {
    /// Creates an empty allocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a closed station.
    pub fn add_station(&mut self, station: Station) {
        self.stations.push(station);
    }

    /// Whether every process was placed.
    pub fn is_complete(&self) -> bool {
        self.unallocated.is_empty()
    }

    /// Number of stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Finds a station by id.
    pub fn station(&self, station_id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.station_id == station_id)
    }

    /// Position of the station holding a process.
    pub fn station_index_of(&self, process_id: &str) -> Option<usize> {
        self.stations.iter().position(|s| s.contains(process_id))
    }

    /// Stations whose waste exceeds `tolerance` minutes.
    pub fn stations_over_waste(&self, tolerance: f64) -> Vec<&Station> {
        self.stations
            .iter()
            .filter(|s| s.waste_time > tolerance)
            .collect()
    }

    /// Total number of placed processes.
    pub fn allocated_count(&self) -> usize {
        self.stations.iter().map(Station::process_count).sum()
    }
}

/// Formats the sequential station label.
pub(crate) fn station_label(n: usize) -> String {
    format!("S{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> ProcessTable {
        ProcessTable::new(vec![
            Process::new("A", 0.4, "M1").with_name("Cut"),
            Process::new("B", 0.3, "M1").with_name("Trim"),
            Process::new("C", 0.5, "M2").with_name("Sew"),
        ])
        .unwrap()
    }

    fn sample_allocation() -> Allocation {
        let table = sample_table();
        let mut s1 = OpenStation::seeded(0, 0.4);
        s1.push(1, 0.3);
        let s2 = OpenStation::seeded(2, 0.5);

        let mut alloc = Allocation::new();
        alloc.add_station(s1.close(station_label(1), &table, 1.0, MachinePolicy::Single));
        alloc.add_station(s2.close(station_label(2), &table, 1.0, MachinePolicy::Single));
        alloc
    }

    #[test]
    fn test_close_station() {
        let alloc = sample_allocation();
        let s1 = alloc.station("S1").unwrap();
        assert_eq!(s1.process_ids(), vec!["A", "B"]);
        assert_eq!(s1.processes[0].name, "Cut");
        assert!((s1.total_expected_time - 0.7).abs() < 1e-10);
        assert!((s1.waste_time - 0.3).abs() < 1e-10);
        assert_eq!(s1.machines_required, 1);
    }

    #[test]
    fn test_open_station_fits() {
        let s = OpenStation::seeded(0, 0.6);
        assert!(!s.fits(0.6, 1.0, 0.0));
        assert!(s.fits(0.4, 1.0, 0.0));
        assert!(!s.is_empty());
        assert!(OpenStation::default().is_empty());
    }

    #[test]
    fn test_fits_absorbs_rounding_noise() {
        let s = OpenStation::seeded(0, 0.1);
        // 0.1 + 0.2 = 0.30000000000000004
        assert!(!s.fits(0.2, 0.3, 0.0));
        assert!(s.fits(0.2, 0.3, 1e-9));
    }

    #[test]
    fn test_machine_policy() {
        assert_eq!(MachinePolicy::Single.machines_for(2.5), 1);
        assert_eq!(MachinePolicy::CeilDuration.machines_for(0.6), 1);
        assert_eq!(MachinePolicy::CeilDuration.machines_for(2.5), 3);
        assert_eq!(MachinePolicy::CeilDuration.machines_for(0.0), 0);
        assert_eq!(
            MachinePolicy::CeilDuration.machines_for(5.0e9),
            5_000_000_000
        );
    }

    #[test]
    fn test_allocation_queries() {
        let alloc = sample_allocation();
        assert_eq!(alloc.station_count(), 2);
        assert_eq!(alloc.allocated_count(), 3);
        assert_eq!(alloc.station_index_of("C"), Some(1));
        assert_eq!(alloc.station_index_of("Z"), None);
        assert!(alloc.is_complete());

        // S1 waste 0.3, S2 waste 0.5
        let over: Vec<_> = alloc
            .stations_over_waste(0.4)
            .iter()
            .map(|s| s.station_id.as_str())
            .collect();
        assert_eq!(over, vec!["S2"]);
    }

    #[test]
    fn test_allocation_json_contract() {
        let alloc = sample_allocation();
        let v = serde_json::to_value(&alloc).unwrap();
        assert!(v.get("unallocated").is_none());
        let s1 = &v["stations"][0];
        assert_eq!(s1["station_id"], "S1");
        assert_eq!(s1["processes"][1]["id"], "B");
        assert_eq!(s1["processes"][1]["name"], "Trim");
        assert_eq!(s1["machines_required"], 1);

        let mut partial = alloc.clone();
        partial.unallocated.push("X".into());
        let v = serde_json::to_value(&partial).unwrap();
        assert_eq!(v["unallocated"][0], "X");
        assert!(!partial.is_complete());
    }
}
