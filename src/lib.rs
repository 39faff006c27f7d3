//! Production line balancing for the U-Engine ecosystem.
//!
//! Allocates manufacturing processes to throughput-bounded work stations,
//! optionally respecting precedence dependencies, and reports the result.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessTable`, `Station`, `Allocation`
//! - **`validation`**: Input integrity checks (duplicate IDs, durations,
//!   dependency references, precedence cycles)
//! - **`allocator`**: Greedy `StationAllocator` and `AllocationSummary`
//! - **`io`**: JSON loader/writer, text report, SVG Gantt chart
//! - **`error`**: `AllocationError`
//!
//! # Example
//!
//! ```
//! use u_station::allocator::{AllocatorConfig, AllocationSummary, StationAllocator};
//! use u_station::io::parse_processes;
//!
//! let table = parse_processes(r#"[
//!     {"id": "A", "name": "Cut", "expectedTimeInMin": 0.4, "machineType": "M1", "dependency": []},
//!     {"id": "B", "name": "Trim", "expectedTimeInMin": 0.3, "machineType": "M1", "dependency": ["A"]}
//! ]"#).unwrap();
//!
//! let allocation = StationAllocator::new(AllocatorConfig::default())
//!     .allocate(&table)
//!     .unwrap();
//! let summary = AllocationSummary::calculate(&allocation);
//! assert_eq!(summary.total_stations, 1);
//! ```
//!
//! # References
//!
//! - Scholl (1999), "Balancing and Sequencing of Assembly Lines"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod allocator;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod validation;

pub use error::{AllocationError, Result};
