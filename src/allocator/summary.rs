//! Allocation quality metrics.
//!
//! Aggregates a finished allocation into line-level indicators.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total Stations | Number of stations |
//! | Total Waste | Sum of (target - station time) |
//! | Total Machines | Sum of machines per station |
//! | Total Work | Sum of station times |
//! | Line Efficiency | Work / (Work + Waste) |
//!
//! # Reference
//! Scholl (1999), "Balancing and Sequencing of Assembly Lines", Ch. 2.2

use serde::{Deserialize, Serialize};

use crate::models::Allocation;

/// Line balance indicators. Times are in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    /// Number of stations.
    pub total_stations: usize,
    /// Sum of waste over all stations.
    pub total_waste_time: f64,
    /// Sum of machines over all stations.
    pub total_machines_required: u64,
    /// Sum of station work time.
    pub total_expected_time: f64,
    /// Share of station capacity spent on work (0.0 when there is no capacity).
    pub line_efficiency: f64,
    /// Processes left out of the allocation.
    pub unallocated_count: usize,
}

impl AllocationSummary {
    /// Computes the summary of an allocation. Empty input yields zeros.
    pub fn calculate(allocation: &Allocation) -> Self {
        let stations = &allocation.stations;
        let total_waste_time: f64 = stations.iter().map(|s| s.waste_time).sum();
        let total_expected_time: f64 = stations.iter().map(|s| s.total_expected_time).sum();
        let total_machines_required = stations
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.machines_required));

        // Work + waste = station count × target
        let capacity = total_expected_time + total_waste_time;
        let line_efficiency = if capacity > 0.0 {
            total_expected_time / capacity
        } else {
            0.0
        };

        Self {
            total_stations: stations.len(),
            total_waste_time,
            total_machines_required,
            total_expected_time,
            line_efficiency,
            unallocated_count: allocation.unallocated.len(),
        }
    }
}
