//! Line balancing domain models.
//!
//! Provides the input table of processes and the station allocation
//! produced from it.
//!
//! # Domain Mappings
//!
//! | u-station | Garment line | Assembly line |
//! |-----------|--------------|---------------|
//! | Process | Sewing operation | Assembly step |
//! | Machine type | Lockstitch, overlock | Press, welder |
//! | Station | Workstation | Cell |
//! | Allocation | Line layout | Line balance |

mod process;
mod station;

pub use process::{Process, ProcessTable};
pub use station::{Allocation, MachinePolicy, ProcessRef, Station};
pub(crate) use station::{station_label, OpenStation};
