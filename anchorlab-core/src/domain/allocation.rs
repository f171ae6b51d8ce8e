//! AllocationTarget — the desired portfolio weighting returned to the host.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Error returned when a weight falls outside the host's accepted range.
#[derive(Debug, Error, PartialEq)]
pub enum WeightError {
    #[error("weight {weight} for '{symbol}' is outside [0, 1]")]
    OutOfRange { symbol: String, weight: f64 },

    #[error("weight for '{symbol}' is NaN")]
    NotANumber { symbol: String },
}

/// Desired portfolio weight per symbol, produced fresh each tick.
///
/// Weights are fractions in `[0, 1]`. An empty target is the "no data /
/// stay flat" result and is always legal. BTreeMap keeps iteration order
/// deterministic for serialized output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationTarget {
    weights: BTreeMap<String, f64>,
}

impl AllocationTarget {
    /// Empty allocation — no entries, interpreted by the host as flat.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Single-symbol allocation, the common case for these strategies.
    pub fn single(symbol: impl Into<String>, weight: f64) -> Result<Self, WeightError> {
        let mut target = Self::empty();
        target.set_weight(symbol, weight)?;
        Ok(target)
    }

    /// Set the weight for a symbol, rejecting values the host cannot interpret.
    pub fn set_weight(
        &mut self,
        symbol: impl Into<String>,
        weight: f64,
    ) -> Result<(), WeightError> {
        let symbol = symbol.into();
        if weight.is_nan() {
            return Err(WeightError::NotANumber { symbol });
        }
        if !(0.0..=1.0).contains(&weight) {
            return Err(WeightError::OutOfRange { symbol, weight });
        }
        self.weights.insert(symbol, weight);
        Ok(())
    }

    pub fn weight(&self, symbol: &str) -> Option<f64> {
        self.weights.get(symbol).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(s, w)| (s.as_str(), *w))
    }

    /// Sum of all weights. The host treats totals above 1.0 as leveraged;
    /// these strategies never produce that.
    pub fn gross_weight(&self) -> f64 {
        self.weights.values().sum()
    }
}
