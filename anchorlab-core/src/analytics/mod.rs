//! Options analytics — host capability surface for Greeks aggregates.
//!
//! The host platform owns the real pricing/Greeks pipeline; strategies see
//! only this trait. [`ReferenceAnalytics`] is a reference model good enough
//! for replay and tests, not a production pricer — hosts substitute their
//! own implementation.

use crate::domain::{OptionKind, OptionsChain};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AnalyticsError {
    #[error("empty options chain for '{symbol}'")]
    EmptyChain { symbol: String },

    #[error("chain for '{symbol}' has no open interest")]
    NoOpenInterest { symbol: String },
}

/// Aggregate chain metrics the gamma strategy consumes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChainMetrics {
    pub net_premium_calls: f64,
    pub net_premium_puts: f64,
    pub max_pain: f64,
    pub spot_gamma: f64,
    pub gamma_max: f64,
}

/// Aggregate analytics over an options chain.
pub trait OptionsAnalytics: Send + Sync {
    /// Net premium outstanding on one side of the chain.
    fn net_premium(&self, chain: &OptionsChain, kind: OptionKind) -> Result<f64, AnalyticsError>;

    /// Strike at which option holders collectively lose the most at expiry.
    fn max_pain(&self, chain: &OptionsChain) -> Result<f64, AnalyticsError>;

    /// Aggregate gamma exposure at the current spot.
    fn spot_gamma(&self, chain: &OptionsChain) -> Result<f64, AnalyticsError>;

    /// Reference gamma-concentration threshold for the chain.
    fn gamma_max(&self, chain: &OptionsChain) -> Result<f64, AnalyticsError>;

    /// All metrics in one pass, for diagnostics.
    fn metrics(&self, chain: &OptionsChain) -> Result<ChainMetrics, AnalyticsError> {
        Ok(ChainMetrics {
            net_premium_calls: self.net_premium(chain, OptionKind::Call)?,
            net_premium_puts: self.net_premium(chain, OptionKind::Put)?,
            max_pain: self.max_pain(chain)?,
            spot_gamma: self.spot_gamma(chain)?,
            gamma_max: self.gamma_max(chain)?,
        })
    }
}

/// Reference implementation of [`OptionsAnalytics`].
///
/// Definitions (see DESIGN.md for the rationale):
/// - net premium: Σ(premium × open_interest) over one side
/// - max pain: quoted strike minimizing total intrinsic value paid to
///   holders at expiry
/// - spot gamma: open-interest-weighted mean gamma at the strike nearest
///   spot
/// - gamma max: largest per-strike OI-weighted gamma concentration
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceAnalytics;

impl ReferenceAnalytics {
    fn require_nonempty(chain: &OptionsChain) -> Result<(), AnalyticsError> {
        if chain.is_empty() {
            return Err(AnalyticsError::EmptyChain {
                symbol: chain.symbol.clone(),
            });
        }
        Ok(())
    }

    fn total_open_interest(chain: &OptionsChain) -> u64 {
        chain.contracts.iter().map(|c| c.open_interest).sum()
    }

    /// OI-weighted gamma of all contracts at one strike.
    fn strike_gamma(chain: &OptionsChain, strike: f64) -> f64 {
        chain
            .contracts
            .iter()
            .filter(|c| c.strike == strike)
            .map(|c| c.greeks.gamma * c.open_interest as f64)
            .sum()
    }
}

impl OptionsAnalytics for ReferenceAnalytics {
    fn net_premium(&self, chain: &OptionsChain, kind: OptionKind) -> Result<f64, AnalyticsError> {
        Self::require_nonempty(chain)?;
        Ok(chain
            .side(kind)
            .map(|c| c.premium * c.open_interest as f64)
            .sum())
    }

    fn max_pain(&self, chain: &OptionsChain) -> Result<f64, AnalyticsError> {
        Self::require_nonempty(chain)?;
        if Self::total_open_interest(chain) == 0 {
            return Err(AnalyticsError::NoOpenInterest {
                symbol: chain.symbol.clone(),
            });
        }

        let mut best_strike = f64::NAN;
        let mut best_payout = f64::INFINITY;
        for settle in chain.strikes() {
            let payout: f64 = chain
                .contracts
                .iter()
                .map(|c| c.intrinsic_at(settle) * c.open_interest as f64)
                .sum();
            // Ties resolve to the lowest strike (strikes() is ascending).
            if payout < best_payout {
                best_payout = payout;
                best_strike = settle;
            }
        }
        Ok(best_strike)
    }

    fn spot_gamma(&self, chain: &OptionsChain) -> Result<f64, AnalyticsError> {
        Self::require_nonempty(chain)?;
        let nearest = chain
            .strikes()
            .into_iter()
            .min_by(|a, b| {
                let da = (a - chain.spot).abs();
                let db = (b - chain.spot).abs();
                da.partial_cmp(&db).expect("NaN strike distance")
            })
            .expect("nonempty chain has at least one strike");
        Ok(Self::strike_gamma(chain, nearest))
    }

    fn gamma_max(&self, chain: &OptionsChain) -> Result<f64, AnalyticsError> {
        Self::require_nonempty(chain)?;
        Ok(chain
            .strikes()
            .into_iter()
            .map(|s| Self::strike_gamma(chain, s))
            .fold(0.0, f64::max))
    }
}
