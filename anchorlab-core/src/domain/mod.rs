//! Domain types: bars, allocations, options chains, intervals.

pub mod allocation;
pub mod bar;
pub mod interval;
pub mod options;

pub use allocation::{AllocationTarget, WeightError};
pub use bar::Bar;
pub use interval::{Interval, ParseIntervalError};
pub use options::{Greeks, OptionContract, OptionKind, OptionsChain};
