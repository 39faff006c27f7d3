//! Plain-text summary report.

use std::fmt;

use crate::allocator::AllocationSummary;
use crate::models::Allocation;

/// Default waste tolerance flagged by the report (minutes).
pub const DEFAULT_WASTE_TOLERANCE: f64 = 0.1;

/// Human-readable summary of an allocation.
///
/// Rendered through [`fmt::Display`]:
///
/// ```
/// use u_station::io::SummaryReport;
/// use u_station::models::Allocation;
///
/// let text = SummaryReport::new(&Allocation::new()).to_string();
/// assert!(text.contains("Total Stations: 0"));
/// ```
#[derive(Debug, Clone)]
pub struct SummaryReport<'a> {
    allocation: &'a Allocation,
    summary: AllocationSummary,
    waste_tolerance: Option<f64>,
}

impl<'a> SummaryReport<'a> {
    /// Creates a report for an allocation.
    pub fn new(allocation: &'a Allocation) -> Self {
        Self {
            allocation,
            summary: AllocationSummary::calculate(allocation),
            waste_tolerance: None,
        }
    }

    /// Lists stations whose waste exceeds `tolerance` minutes.
    pub fn with_waste_tolerance(mut self, tolerance: f64) -> Self {
        self.waste_tolerance = Some(tolerance);
        self
    }

    /// The metrics shown in the report header.
    pub fn summary(&self) -> &AllocationSummary {
        &self.summary
    }
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        writeln!(f, "Summary Report:")?;
        writeln!(f, "=================")?;
        writeln!(f, "- Total Stations: {}", s.total_stations)?;
        writeln!(f, "- Total Waste Time: {:.2} minutes", s.total_waste_time)?;
        writeln!(f, "- Total Machines Required: {}", s.total_machines_required)?;
        writeln!(f, "- Line Efficiency: {:.1}%", s.line_efficiency * 100.0)?;

        if !self.allocation.is_complete() {
            writeln!(
                f,
                "- Unallocated Processes: {}",
                self.allocation.unallocated.join(", ")
            )?;
        }

        if let Some(tolerance) = self.waste_tolerance {
            let over: Vec<_> = self
                .allocation
                .stations_over_waste(tolerance)
                .iter()
                .map(|st| st.station_id.as_str())
                .collect();
            if over.is_empty() {
                writeln!(f, "- Stations Over Waste Tolerance ({tolerance:.2} min): none")?;
            } else {
                writeln!(
                    f,
                    "- Stations Over Waste Tolerance ({tolerance:.2} min): {}",
                    over.join(", ")
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Station Details:")?;
        writeln!(f, "================")?;
        for station in &self.allocation.stations {
            writeln!(f)?;
            writeln!(f, "Station ID: {}", station.station_id)?;
            writeln!(f, "- Processes: [{}]", station.process_ids().join(", "))?;
            writeln!(
                f,
                "- Total Expected Time: {:.2} minutes",
                station.total_expected_time
            )?;
            writeln!(f, "- Waste Time: {:.2} minutes", station.waste_time)?;
            writeln!(f, "- Machines Required: {}", station.machines_required)?;
        }
        Ok(())
    }
}
