//! Allocator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{AllocationError, Result};

/// Default throughput target (minutes per station).
pub const DEFAULT_THROUGHPUT_TARGET: f64 = 1.0;

/// Default slack for capacity comparisons (minutes): exact `<=`.
pub const DEFAULT_TOLERANCE: f64 = 0.0;

/// Settings for one allocation run.
///
/// # Example
/// ```
/// use u_station::allocator::AllocatorConfig;
///
/// let config = AllocatorConfig::new()
///     .with_respect_dependencies(false)
///     .with_throughput_target(2.5);
/// assert_eq!(config.throughput_target, 2.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Dependency-respecting mode when `true`, machine-type grouping otherwise.
    pub respect_dependencies: bool,
    /// Maximum work per station (minutes).
    pub throughput_target: f64,
    /// Slack added to the target in "fits" checks. A positive value lets
    /// multi-process stations exceed the target by up to that amount.
    pub tolerance: f64,
    /// Fail instead of returning a partial allocation.
    pub strict: bool,
}

impl AllocatorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the allocation mode.
    pub fn with_respect_dependencies(mut self, respect: bool) -> Self {
        self.respect_dependencies = respect;
        self
    }

    /// Sets the throughput target (minutes).
    pub fn with_throughput_target(mut self, target: f64) -> Self {
        self.throughput_target = target;
        self
    }

    /// Sets the comparison slack (minutes).
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Turns partial allocations into errors.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Checks that the target is positive and finite.
    pub fn validate(&self) -> Result<()> {
        if self.throughput_target.is_finite() && self.throughput_target > 0.0 {
            Ok(())
        } else {
            Err(AllocationError::InvalidThroughputTarget(self.throughput_target))
        }
    }

    /// Tolerance clamped to a usable non-negative value.
    pub(crate) fn slack(&self) -> f64 {
        if self.tolerance.is_finite() {
            self.tolerance.max(0.0)
        } else {
            0.0
        }
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            respect_dependencies: true,
            throughput_target: DEFAULT_THROUGHPUT_TARGET,
            tolerance: DEFAULT_TOLERANCE,
            strict: false,
        }
    }
}
