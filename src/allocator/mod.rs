//! Greedy station allocation and allocation metrics.
//!
//! # Algorithm
//!
//! `StationAllocator` packs processes into stations bounded by a throughput
//! target, keeping each station to one machine type. Two modes:
//!
//! - **Dependency-respecting**: stations open in precedence order; each is
//!   seeded with the first ready process and filled with ready processes of
//!   the same machine type. One machine per station.
//! - **Grouped**: dependencies ignored; each machine type is packed
//!   independently in table order. `ceil(station time)` machines per station.
//!
//! Both are greedy (first found in table order wins), not optimal.
//!
//! # References
//!
//! - Scholl (1999), "Balancing and Sequencing of Assembly Lines"
//! - Coffman et al. (1996), "Approximation Algorithms for Bin Packing: A Survey"

mod config;
mod dependency;
mod grouped;
mod summary;

pub use config::{AllocatorConfig, DEFAULT_THROUGHPUT_TARGET, DEFAULT_TOLERANCE};
pub use summary::AllocationSummary;

use tracing::{info, warn};

use crate::error::{AllocationError, Result};
use crate::models::{Allocation, ProcessTable};
use crate::validation::{find_cycles, validate_dependencies};

/// Allocates a process table to stations.
///
/// Stateless between calls: the same table and configuration always give
/// the same allocation.
///
/// # Example
///
/// ```
/// use u_station::allocator::{AllocatorConfig, StationAllocator};
/// use u_station::models::{Process, ProcessTable};
///
/// let table = ProcessTable::new(vec![
///     Process::new("A", 0.4, "M1"),
///     Process::new("B", 0.3, "M1").with_dependency("A"),
///     Process::new("C", 0.5, "M2").with_dependency("A"),
/// ])
/// .unwrap();
///
/// let allocation = StationAllocator::new(AllocatorConfig::default())
///     .allocate(&table)
///     .unwrap();
/// assert_eq!(allocation.station_count(), 2);
/// assert_eq!(allocation.stations[0].process_ids(), vec!["A", "B"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StationAllocator {
    config: AllocatorConfig,
}

impl StationAllocator {
    /// Creates an allocator with the given configuration.
    pub fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Allocates every process in `table` to a station.
    ///
    /// # Errors
    /// - [`AllocationError::InvalidThroughputTarget`] for a non-positive target.
    /// - [`AllocationError::InvalidDependency`] (dependency mode) before any
    ///   station is built.
    /// - [`AllocationError::Unallocated`] in strict mode when cyclic
    ///   dependencies leave processes unplaced.
    pub fn allocate(&self, table: &ProcessTable) -> Result<Allocation> {
        self.config.validate()?;

        let allocation = if self.config.respect_dependencies {
            validate_dependencies(table)?;
            dependency::allocate(table, &self.config)
        } else {
            grouped::allocate(table, &self.config)
        };

        if !allocation.is_complete() {
            let cycle = find_cycles(table);
            warn!(
                unallocated = ?allocation.unallocated,
                cycle = ?cycle,
                "dependency graph left processes unallocated"
            );
            if self.config.strict {
                return Err(AllocationError::Unallocated {
                    process_ids: allocation.unallocated,
                });
            }
        }

        info!(
            processes = table.len(),
            work = table.total_expected_time(),
            stations = allocation.station_count(),
            respect_dependencies = self.config.respect_dependencies,
            target = self.config.throughput_target,
            "allocation finished"
        );
        Ok(allocation)
    }

    /// Allocates and summarizes in one call.
    pub fn allocate_with_summary(
        &self,
        table: &ProcessTable,
    ) -> Result<(Allocation, AllocationSummary)> {
        let allocation = self.allocate(table)?;
        let summary = AllocationSummary::calculate(&allocation);
        Ok((allocation, summary))
    }
}
