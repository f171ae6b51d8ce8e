//! Concrete strategy implementations.
//!
//! Each strategy is a pure per-tick evaluator: static configuration in,
//! one [`AllocationTarget`](crate::domain::AllocationTarget) out per
//! `on_tick`, with advisory diagnostics as the only side channel.

pub mod anchored_vwap;
pub mod gamma_regime;

pub use anchored_vwap::AnchoredVwapStrategy;
pub use gamma_regime::{GammaRegimeStrategy, DEFAULT_REGIME_WEIGHT};
