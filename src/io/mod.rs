//! Input and output collaborators around the allocator.
//!
//! - **`loader`**: JSON process records → validated `ProcessTable`
//! - **`writer`**: allocation JSON and text artefacts on disk
//! - **`report`**: plain-text summary
//! - **`chart`**: Gantt-style SVG chart

mod chart;
mod loader;
mod report;
mod writer;

pub use chart::{GanttBar, GanttChart, UNKNOWN_MACHINE};
pub use loader::{load_processes, parse_processes};
pub use report::{SummaryReport, DEFAULT_WASTE_TOLERANCE};
pub use writer::{allocation_to_json, write_allocation, write_text};
