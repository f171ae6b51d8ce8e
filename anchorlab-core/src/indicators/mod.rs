//! Indicator implementations.
//!
//! Indicators compute over a full bar window (oldest-first) and return a
//! series aligned with the input, NaN where no value exists yet.

pub mod vwap;

pub use vwap::{AnchoredVwap, PriceSource};
