//! Options chain domain types.
//!
//! Host-supplied per tick when a strategy declares an options data
//! requirement. Greeks come precomputed from the host's pricing layer;
//! nothing in this crate prices options.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Call,
    Put,
}

/// Per-contract Greeks as supplied by the host.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
}

/// One listed option contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionContract {
    pub kind: OptionKind,
    pub strike: f64,
    pub expiry: NaiveDate,
    /// Mid premium per share.
    pub premium: f64,
    pub open_interest: u64,
    pub greeks: Greeks,
}

impl OptionContract {
    /// Intrinsic value to the holder if the underlying settles at `settle`.
    pub fn intrinsic_at(&self, settle: f64) -> f64 {
        match self.kind {
            OptionKind::Call => (settle - self.strike).max(0.0),
            OptionKind::Put => (self.strike - settle).max(0.0),
        }
    }
}

/// A full chain for one underlying at one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsChain {
    pub symbol: String,
    /// Underlying spot at snapshot time.
    pub spot: f64,
    pub contracts: Vec<OptionContract>,
}

impl OptionsChain {
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Contracts of one side, in chain order.
    pub fn side(&self, kind: OptionKind) -> impl Iterator<Item = &OptionContract> {
        self.contracts.iter().filter(move |c| c.kind == kind)
    }

    /// Distinct strikes quoted in the chain, ascending.
    pub fn strikes(&self) -> Vec<f64> {
        let mut strikes: Vec<f64> = self.contracts.iter().map(|c| c.strike).collect();
        strikes.sort_by(|a, b| a.partial_cmp(b).expect("NaN strike"));
        strikes.dedup();
        strikes
    }
}
